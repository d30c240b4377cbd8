//! Per-user vocabulary ledger
//!
//! This module provides:
//! - Word records and the New → Seen → Learnt lifecycle
//! - Pure transition rules for answers and explicit overrides
//! - `VocabularyLedger`, the only path through which ledgers are mutated
//! - Level bootstrapping of easier vocabulary

pub mod bootstrap;
pub mod models;
pub mod transitions;

pub use bootstrap::{BootstrapReport, LevelBootstrapper};
pub use models::*;

use chrono::{DateTime, Utc};

use crate::error::{Result, VocabError};
use crate::store::{UpdateStatus, VocabularyStore};

use transitions::{apply_mark_known, apply_repetition};

/// Trim a word and reject blank input
pub fn normalize_word(word: &str) -> Result<&str> {
    let word = word.trim();
    if word.is_empty() {
        return Err(VocabError::Validation("word must not be blank".to_string()));
    }
    Ok(word)
}

/// State-machine operations over one store
pub struct VocabularyLedger<'a, S: VocabularyStore> {
    store: &'a S,
    learnt_threshold: u32,
}

impl<'a, S: VocabularyStore> VocabularyLedger<'a, S> {
    pub fn new(store: &'a S, learnt_threshold: u32) -> Self {
        Self {
            store,
            learnt_threshold,
        }
    }

    /// New → Seen. A word already in the ledger is reported, not overwritten.
    pub fn add_word(&self, user_id: &str, word: &str, now: DateTime<Utc>) -> Result<AddOutcome> {
        let word = normalize_word(word)?;
        let record = WordRecord::introduced(word, now);

        let inserted = self
            .store
            .insert_missing_word_records(user_id, std::slice::from_ref(&record))?;

        if inserted == 0 {
            log::debug!("Word '{}' already in ledger of {}", word, user_id);
            return Ok(AddOutcome::Duplicate);
        }
        Ok(AddOutcome::Created)
    }

    /// Apply one answer; may move Seen → Learnt
    pub fn record_repetition(
        &self,
        user_id: &str,
        word: &str,
        success: bool,
        now: DateTime<Utc>,
    ) -> Result<RepetitionOutcome> {
        let word = normalize_word(word)?;
        let threshold = self.learnt_threshold;

        let mut outcome = None;
        let status = self.store.atomic_update_word(user_id, word, &mut |record: &mut WordRecord| {
            outcome = Some(apply_repetition(record, success, now, threshold));
        })?;

        match (status, outcome) {
            (UpdateStatus::Updated, Some(outcome)) => {
                if outcome.became_learnt {
                    log::info!("Word '{}' learnt by {}", word, user_id);
                }
                Ok(outcome)
            }
            _ => Err(VocabError::WordNotFound(word.to_string())),
        }
    }

    /// Seen → Learnt without repetition accounting
    pub fn mark_known(&self, user_id: &str, word: &str, now: DateTime<Utc>) -> Result<WordRecord> {
        let word = normalize_word(word)?;

        let mut updated = None;
        let status = self.store.atomic_update_word(user_id, word, &mut |record: &mut WordRecord| {
            apply_mark_known(record, now);
            updated = Some(record.clone());
        })?;

        match (status, updated) {
            (UpdateStatus::Updated, Some(record)) => Ok(record),
            _ => Err(VocabError::WordNotFound(word.to_string())),
        }
    }

    /// Records not yet learnt; empty when the user has no ledger
    pub fn learning_records(&self, user_id: &str) -> Result<Vec<WordRecord>> {
        Ok(self
            .store
            .get_user_ledger(user_id)?
            .map(|ledger| ledger.learning().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    const THRESHOLD: u32 = 5;

    fn create_test_store() -> (JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());
        store.init().unwrap();
        (store, temp_dir)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap()
    }

    fn assert_invariants(store: &JsonFileStore, user_id: &str) {
        if let Some(ledger) = store.get_user_ledger(user_id).unwrap() {
            for record in &ledger.vocabulary {
                assert!(record.history_correct <= record.history_seen, "{:?}", record);
            }
        }
    }

    #[test]
    fn test_add_word_twice() {
        let (store, _temp) = create_test_store();
        let ledger = VocabularyLedger::new(&store, THRESHOLD);

        assert_eq!(ledger.add_word("u1", "apple", now()).unwrap(), AddOutcome::Created);
        assert_eq!(ledger.add_word("u1", "apple", now()).unwrap(), AddOutcome::Duplicate);

        let stored = store.get_user_ledger("u1").unwrap().unwrap();
        assert_eq!(stored.vocabulary.len(), 1);
        let record = &stored.vocabulary[0];
        assert_eq!(record.history_seen, 1);
        assert_eq!(record.history_correct, 0);
        assert_eq!(record.time_seen, now());
        assert_invariants(&store, "u1");
    }

    #[test]
    fn test_add_blank_word_rejected() {
        let (store, _temp) = create_test_store();
        let ledger = VocabularyLedger::new(&store, THRESHOLD);
        assert!(matches!(
            ledger.add_word("u1", "   ", now()),
            Err(VocabError::Validation(_))
        ));
    }

    #[test]
    fn test_repetition_on_missing_word() {
        let (store, _temp) = create_test_store();
        let ledger = VocabularyLedger::new(&store, THRESHOLD);

        let err = ledger.record_repetition("u1", "ghost", true, now()).unwrap_err();
        assert!(matches!(err, VocabError::WordNotFound(w) if w == "ghost"));

        ledger.add_word("u1", "apple", now()).unwrap();
        let err = ledger.record_repetition("u1", "ghost", true, now()).unwrap_err();
        assert!(matches!(err, VocabError::WordNotFound(_)));
    }

    #[test]
    fn test_spacing_prevents_rapid_learning() {
        let (store, _temp) = create_test_store();
        let ledger = VocabularyLedger::new(&store, THRESHOLD);

        store
            .upsert_word_record(
                "u1",
                &WordRecord {
                    word: "apple".to_string(),
                    time_seen: now() - Duration::days(1),
                    history_seen: 4,
                    history_correct: 4,
                    is_word_learnt: false,
                },
            )
            .unwrap();

        let outcome = ledger.record_repetition("u1", "apple", true, now()).unwrap();
        assert!(!outcome.became_learnt);
        assert_eq!(outcome.record.history_seen, 5);
        assert_eq!(outcome.record.history_correct, 5);

        let stored = store.get_user_ledger("u1").unwrap().unwrap();
        assert_eq!(stored.state_of("apple"), WordState::Seen);
        assert_invariants(&store, "u1");
    }

    #[test]
    fn test_spaced_success_learns() {
        let (store, _temp) = create_test_store();
        let ledger = VocabularyLedger::new(&store, THRESHOLD);

        store
            .upsert_word_record(
                "u1",
                &WordRecord {
                    word: "apple".to_string(),
                    time_seen: now() - Duration::days(8),
                    history_seen: 6,
                    history_correct: 4,
                    is_word_learnt: false,
                },
            )
            .unwrap();

        let outcome = ledger.record_repetition("u1", "apple", true, now()).unwrap();
        assert!(outcome.became_learnt);

        let outcome = ledger.record_repetition("u1", "apple", false, now()).unwrap();
        assert!(outcome.record.is_word_learnt);
        assert_invariants(&store, "u1");
    }

    #[test]
    fn test_mark_known() {
        let (store, _temp) = create_test_store();
        let ledger = VocabularyLedger::new(&store, THRESHOLD);

        assert!(matches!(
            ledger.mark_known("u1", "apple", now()),
            Err(VocabError::WordNotFound(_))
        ));

        ledger.add_word("u1", "apple", now()).unwrap();
        let record = ledger.mark_known("u1", "apple", now()).unwrap();
        assert!(record.is_word_learnt);
        assert_eq!(record.history_seen, 1);
        assert!(ledger.learning_records("u1").unwrap().is_empty());
    }

    #[test]
    fn test_learning_records_without_ledger() {
        let (store, _temp) = create_test_store();
        let ledger = VocabularyLedger::new(&store, THRESHOLD);
        assert!(ledger.learning_records("nobody").unwrap().is_empty());
    }
}
