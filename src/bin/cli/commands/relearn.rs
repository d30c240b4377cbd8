use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, user: &str, limit: Option<usize>, format: &OutputFormat) -> Result<()> {
    let engine = app.engine()?;
    let batch = engine
        .get_relearn_batch(user, limit)
        .with_context(|| format!("Failed to build relearn batch for {}", user))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
        OutputFormat::Plain => {
            if batch.items.is_empty() {
                println!("Nothing to relearn.");
            }
            for item in &batch.items {
                println!("{:<24} {:.3}", item.word, item.probability);
                for definition in &item.definitions {
                    println!("    {}", definition);
                }
            }
            if !batch.skipped.is_empty() {
                println!();
                println!("Skipped {} words:", batch.skipped.len());
                for skipped in &batch.skipped {
                    println!("  {} ({})", skipped.word, skipped.reason);
                }
            }
        }
    }

    Ok(())
}
