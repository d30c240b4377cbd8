use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, user: &str, level: &str, format: &OutputFormat) -> Result<()> {
    let engine = app.engine()?;
    let report = engine
        .assign_level(user, level)
        .with_context(|| format!("Failed to assign level '{}' to {}", level, user))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Plain => {
            println!("Assigned level {} to {}", report.level, user);
            println!("  Marked known: {}", report.inserted);
            println!("  Already in ledger: {}", report.already_present);
        }
    }

    Ok(())
}
