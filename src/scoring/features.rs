//! Feature extraction for the forgetting classifier

use chrono::{DateTime, Utc};

use crate::error::{Result, VocabError};
use crate::ledger::transitions::elapsed_days;
use crate::ledger::WordRecord;
use crate::lexicon::LexicalEntry;

/// Number of features fed to the classifier
pub const FEATURE_COUNT: usize = 6;

/// `[delta_time_days, history_correct, history_wrong,
///   age_of_acquisition, log_frequency, concreteness]`
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Days since the record was last seen, rounded to three decimals
pub fn delta_time_days(record: &WordRecord, now: DateTime<Utc>) -> f64 {
    (elapsed_days(record.time_seen, now) * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    now: DateTime<Utc>,
}

impl FeatureExtractor {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn delta_time_days(&self, record: &WordRecord) -> f64 {
        delta_time_days(record, self.now)
    }

    pub fn extract(&self, record: &WordRecord, entry: &LexicalEntry) -> Result<FeatureVector> {
        let word = record.word.as_str();
        let aoa = entry
            .age_of_acquisition
            .ok_or_else(|| VocabError::missing(word, "age_of_acquisition"))?;
        let log_frequency = entry
            .log_frequency
            .ok_or_else(|| VocabError::missing(word, "log_frequency"))?;
        let concreteness = entry
            .concreteness
            .ok_or_else(|| VocabError::missing(word, "concreteness"))?;

        Ok([
            self.delta_time_days(record),
            record.history_correct as f64,
            record.history_wrong() as f64,
            aoa,
            log_frequency,
            concreteness,
        ])
    }
}
