//! Level bootstrapping
//!
//! Assigning level `L` marks every lexicon word of every level strictly
//! below `L` as learnt. Words already in the ledger keep their record, so
//! assigning the same level again changes nothing.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::WordRecord;
use crate::error::Result;
use crate::lexicon::LevelScale;
use crate::store::VocabularyStore;

/// Summary of one level assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapReport {
    pub level: String,
    pub inserted: usize,
    pub already_present: usize,
}

pub struct LevelBootstrapper<'a, S: VocabularyStore> {
    store: &'a S,
    scale: &'a LevelScale,
}

impl<'a, S: VocabularyStore> LevelBootstrapper<'a, S> {
    pub fn new(store: &'a S, scale: &'a LevelScale) -> Self {
        Self { store, scale }
    }

    /// Record the level and pre-mark all easier vocabulary as learnt.
    ///
    /// The level is stored first and the words in a second, all-or-nothing
    /// write. If that write fails the level is kept without its words, and
    /// assigning the same level again completes the bootstrap.
    pub fn assign_level(
        &self,
        user_id: &str,
        level: &str,
        now: DateTime<Utc>,
    ) -> Result<BootstrapReport> {
        let level = level.trim();
        let easier = self.scale.below(level)?;

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for easier_level in easier {
            for entry in self.store.get_words_by_level(easier_level)? {
                if seen.insert(entry.word.clone()) {
                    records.push(WordRecord::known(entry.word, now));
                }
            }
        }

        self.store.set_user_level(user_id, level)?;
        let inserted = self.store.insert_missing_word_records(user_id, &records)?;

        log::info!(
            "Assigned level {} to {}: {} words bootstrapped, {} already present",
            level,
            user_id,
            inserted,
            records.len() - inserted
        );

        Ok(BootstrapReport {
            level: level.to_string(),
            inserted,
            already_present: records.len() - inserted,
        })
    }
}
