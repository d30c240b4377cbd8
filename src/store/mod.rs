//! Persistence contract for lexicon and ledgers
//!
//! The engine treats every call as one logical operation that either
//! succeeds or fails. Serializing concurrent check-then-insert sequences for
//! the same user is the store's responsibility.

mod file_store;

pub use file_store::JsonFileStore;

use std::collections::HashMap;

use thiserror::Error;

use crate::ledger::{UserLedger, WordRecord};
use crate::lexicon::LexicalEntry;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid user id: {0:?}")]
    InvalidUserId(String),

    #[error("Invalid record in ledger of {user_id}: {reason}")]
    InvalidRecord { user_id: String, reason: String },

    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Outcome of an in-place record update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Updated,
    NotFound,
}

pub trait VocabularyStore {
    fn get_lexical_entry(&self, word: &str) -> Result<Option<LexicalEntry>>;

    /// Entries for every word the lexicon holds; absent words are left out
    fn get_lexical_entries(&self, words: &[String]) -> Result<HashMap<String, LexicalEntry>> {
        let mut entries = HashMap::new();
        for word in words {
            if let Some(entry) = self.get_lexical_entry(word)? {
                entries.insert(word.clone(), entry);
            }
        }
        Ok(entries)
    }

    fn get_words_by_level(&self, level: &str) -> Result<Vec<LexicalEntry>>;

    fn get_user_ledger(&self, user_id: &str) -> Result<Option<UserLedger>>;

    /// Insert or replace the record keyed by `record.word`, creating the
    /// ledger when the user has none yet
    fn upsert_word_record(&self, user_id: &str, record: &WordRecord) -> Result<()>;

    /// Insert every record whose word the ledger does not hold yet and
    /// return how many were inserted. Existing records are left untouched.
    /// Either all missing records are stored or none are.
    fn insert_missing_word_records(&self, user_id: &str, records: &[WordRecord]) -> Result<usize>;

    fn set_user_level(&self, user_id: &str, level: &str) -> Result<()>;

    /// Run `mutation` on the stored record while holding the store's write
    /// side, then persist it
    fn atomic_update_word(
        &self,
        user_id: &str,
        word: &str,
        mutation: &mut dyn FnMut(&mut WordRecord),
    ) -> Result<UpdateStatus>;
}
