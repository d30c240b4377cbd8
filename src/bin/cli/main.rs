mod app;
mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "relearn-cli", about = "Spaced-repetition vocabulary engine CLI", version)]
struct Cli {
    /// Data directory (default: platform local data dir + /relearn)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/relearn.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Replace the reference lexicon with the contents of a CSV file
    ImportLexicon {
        /// CSV with Word, Level, Age_Of_Acquisition, Log_Freq_HAL, Concreteness_Rating, Definitions
        csv: PathBuf,
    },

    /// Introduce a new word to a user
    Add {
        user: String,
        word: String,
    },

    /// Record the result of one repetition
    Review {
        user: String,
        word: String,
        #[command(flatten)]
        result: ReviewResult,
    },

    /// Mark a word as known regardless of its history
    Known {
        user: String,
        word: String,
    },

    /// Assign a proficiency level and pre-mark easier words as learnt
    Level {
        user: String,
        level: String,
    },

    /// Show the words most at risk of being forgotten
    Relearn {
        user: String,
        /// Maximum number of words (default: max_batch_size from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List words the user is still learning
    Learning {
        user: String,
    },

    /// Predict next words for a text and match them against the learning pool
    Suggest {
        user: String,
        /// Text to continue (use "-" to read from stdin)
        text: String,
        /// Number of predictions (default: nlp.suggestion_count from config)
        #[arg(long)]
        count: Option<usize>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ReviewResult {
    /// The answer was correct
    #[arg(long)]
    correct: bool,
    /// The answer was wrong
    #[arg(long)]
    wrong: bool,
}

/// Resolve "-" as stdin
fn resolve_text(text: String) -> anyhow::Result<String> {
    if text == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        Ok(buf.trim().to_string())
    } else {
        Ok(text)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.data_dir, cli.config.as_deref())?;

    match cli.command {
        Command::ImportLexicon { csv } => {
            commands::import::run(&app, &csv, &cli.format)?;
        }
        Command::Add { user, word } => {
            commands::words::run_add(&app, &user, &word, &cli.format)?;
        }
        Command::Review { user, word, result } => {
            commands::words::run_review(&app, &user, &word, result.correct, &cli.format)?;
        }
        Command::Known { user, word } => {
            commands::words::run_known(&app, &user, &word, &cli.format)?;
        }
        Command::Level { user, level } => {
            commands::level::run(&app, &user, &level, &cli.format)?;
        }
        Command::Relearn { user, limit } => {
            commands::relearn::run(&app, &user, limit, &cli.format)?;
        }
        Command::Learning { user } => {
            commands::words::run_learning(&app, &user, &cli.format)?;
        }
        Command::Suggest { user, text, count } => {
            let text = resolve_text(text)?;
            commands::suggest::run(&app, &user, &text, count, &cli.format)?;
        }
    }

    Ok(())
}
