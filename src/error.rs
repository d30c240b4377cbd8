use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the relearn engine.
///
/// Only `ClassifierUnavailable` is meant to stop the process; every other
/// variant is a per-request outcome the caller can report and move past.
#[derive(Error, Debug)]
pub enum VocabError {
    #[error("Missing lexical data for '{word}': {field}")]
    MissingLexicalData { word: String, field: &'static str },

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Word not found in ledger: {0}")]
    WordNotFound(String),

    #[error("Word already in ledger: {0}")]
    DuplicateWord(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("NLP service error: {0}")]
    Nlp(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl VocabError {
    pub(crate) fn missing(word: &str, field: &'static str) -> Self {
        Self::MissingLexicalData {
            word: word.to_string(),
            field,
        }
    }
}

pub type Result<T> = std::result::Result<T, VocabError>;
