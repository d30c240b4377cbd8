use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use relearn_lib::lexicon::parse_lexicon_csv;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, csv_path: &Path, format: &OutputFormat) -> Result<()> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open {}", csv_path.display()))?;
    let report = parse_lexicon_csv(file).context("Failed to parse lexicon")?;

    let store = app.store()?;
    store
        .replace_lexicon(&report.entries)
        .context("Failed to store lexicon")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "imported": report.entries.len(),
                "skippedRows": report.skipped_rows,
                "duplicateRows": report.duplicate_rows,
                "path": store.base_path().join("lexicon.json").to_string_lossy(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} words from {}", report.entries.len(), csv_path.display());
            if report.skipped_rows > 0 {
                println!("  Skipped rows: {}", report.skipped_rows);
            }
            if report.duplicate_rows > 0 {
                println!("  Duplicate rows: {}", report.duplicate_rows);
            }
        }
    }

    Ok(())
}
