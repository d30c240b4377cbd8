use anyhow::{bail, Context, Result};

use relearn_lib::{HttpNlpClient, SuggestOptions};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    user: &str,
    text: &str,
    count: Option<usize>,
    format: &OutputFormat,
) -> Result<()> {
    let Some(nlp) = app.config.nlp.as_ref() else {
        bail!("No [nlp] section in config; suggestions need a prediction service");
    };

    let client = HttpNlpClient::new(nlp).context("Failed to create NLP client")?;
    let options = SuggestOptions {
        count: count.unwrap_or(nlp.suggestion_count),
        threshold: nlp.synonym_threshold,
    };

    let engine = app.engine()?;
    let suggestions = engine
        .suggest_next_words(user, text, &client, &client, options)
        .context("Failed to get suggestions")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }
        OutputFormat::Plain => {
            for suggestion in &suggestions {
                if suggestion.synonyms.is_empty() {
                    println!("{}", suggestion.word);
                } else {
                    println!("{}  ~ {}", suggestion.word, suggestion.synonyms.join(", "));
                }
            }
        }
    }

    Ok(())
}
