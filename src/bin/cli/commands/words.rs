use anyhow::{Context, Result};

use relearn_lib::{AddOutcome, WordRecord};

use crate::app::App;
use crate::OutputFormat;

pub fn run_add(app: &App, user: &str, word: &str, format: &OutputFormat) -> Result<()> {
    let engine = app.engine()?;
    let outcome = engine
        .add_new_word(user, word)
        .with_context(|| format!("Failed to add '{}' for {}", word, user))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "word": word.trim(),
                "created": outcome == AddOutcome::Created,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => match outcome {
            AddOutcome::Created => println!("Added \"{}\"", word.trim()),
            AddOutcome::Duplicate => println!("\"{}\" is already in the ledger", word.trim()),
        },
    }

    Ok(())
}

pub fn run_review(
    app: &App,
    user: &str,
    word: &str,
    success: bool,
    format: &OutputFormat,
) -> Result<()> {
    let engine = app.engine()?;
    let outcome = engine
        .record_repetition_result(user, word, success)
        .with_context(|| format!("Failed to record review of '{}' for {}", word, user))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Plain => {
            print_record(&outcome.record);
            if outcome.became_learnt {
                println!("  Learnt!");
            }
        }
    }

    Ok(())
}

pub fn run_known(app: &App, user: &str, word: &str, format: &OutputFormat) -> Result<()> {
    let engine = app.engine()?;
    let record = engine
        .mark_word_known(user, word)
        .with_context(|| format!("Failed to mark '{}' known for {}", word, user))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Plain => print_record(&record),
    }

    Ok(())
}

pub fn run_learning(app: &App, user: &str, format: &OutputFormat) -> Result<()> {
    let engine = app.engine()?;
    let words = engine
        .learning_vocabulary(user)
        .with_context(|| format!("Failed to read ledger of {}", user))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&words)?);
        }
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("(no words in progress)");
            }
            for word in &words {
                println!("{}", word);
            }
        }
    }

    Ok(())
}

fn print_record(record: &WordRecord) {
    let state = if record.is_word_learnt { "learnt" } else { "learning" };
    println!(
        "{} [{}] {}/{} correct, last seen {}",
        record.word,
        state,
        record.history_correct,
        record.history_seen,
        record.time_seen.format("%Y-%m-%d %H:%M")
    );
}
