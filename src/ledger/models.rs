//! Data models for the per-user vocabulary ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VocabError};

/// Exposure history of one word for one learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub word: String,
    /// Last time the word was shown or marked
    pub time_seen: DateTime<Utc>,
    pub history_seen: u32,
    pub history_correct: u32,
    #[serde(default)]
    pub is_word_learnt: bool,
}

impl WordRecord {
    /// A freshly introduced word: seen once, never answered correctly
    pub fn introduced(word: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            word: word.into(),
            time_seen: now,
            history_seen: 1,
            history_correct: 0,
            is_word_learnt: false,
        }
    }

    /// A word the learner is assumed to know already
    pub fn known(word: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            word: word.into(),
            time_seen: now,
            history_seen: 0,
            history_correct: 0,
            is_word_learnt: true,
        }
    }

    /// Reject counters no sequence of answers can produce
    pub fn validate(&self) -> Result<()> {
        if self.word.trim().is_empty() {
            return Err(VocabError::Validation("record word must not be blank".to_string()));
        }
        if self.history_correct > self.history_seen {
            return Err(VocabError::Validation(format!(
                "'{}' has {} correct answers out of {} exposures",
                self.word, self.history_correct, self.history_seen
            )));
        }
        if !self.is_word_learnt && self.history_seen == 0 {
            return Err(VocabError::Validation(format!(
                "'{}' is still being learnt but was never seen",
                self.word
            )));
        }
        Ok(())
    }

    pub fn history_wrong(&self) -> u32 {
        self.history_seen.saturating_sub(self.history_correct)
    }

    pub fn state(&self) -> WordState {
        if self.is_word_learnt {
            WordState::Learnt
        } else {
            WordState::Seen
        }
    }
}

/// Lifecycle of a word in a ledger. `New` means there is no record yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WordState {
    New,
    Seen,
    Learnt,
}

/// All word records of one learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLedger {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub vocabulary: Vec<WordRecord>,
}

impl UserLedger {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            level: None,
            vocabulary: Vec::new(),
        }
    }

    pub fn get(&self, word: &str) -> Option<&WordRecord> {
        self.vocabulary.iter().find(|r| r.word == word)
    }

    pub fn get_mut(&mut self, word: &str) -> Option<&mut WordRecord> {
        self.vocabulary.iter_mut().find(|r| r.word == word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn state_of(&self, word: &str) -> WordState {
        self.get(word).map_or(WordState::New, WordRecord::state)
    }

    /// Append a record, refusing a second record for the same word
    pub fn insert_new(&mut self, record: WordRecord) -> Result<()> {
        if self.contains(&record.word) {
            return Err(VocabError::DuplicateWord(record.word));
        }
        self.vocabulary.push(record);
        Ok(())
    }

    /// Replace the record for the same word in place, or append it
    pub fn upsert(&mut self, record: WordRecord) {
        match self.get_mut(&record.word) {
            Some(existing) => *existing = record,
            None => self.vocabulary.push(record),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.vocabulary.iter().try_for_each(WordRecord::validate)
    }

    /// Records still being learnt, in ledger order
    pub fn learning(&self) -> impl Iterator<Item = &WordRecord> {
        self.vocabulary.iter().filter(|r| !r.is_word_learnt)
    }
}

/// Result of introducing a word to a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddOutcome {
    Created,
    Duplicate,
}

/// Result of recording one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepetitionOutcome {
    pub record: WordRecord,
    pub became_learnt: bool,
}
