//! Relearn batch selection
//!
//! Records seen too recently are dropped before scoring. The rest are
//! scored together and only the ones classified as forgotten are kept,
//! least likely to be remembered first.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classifier::ForgettingClassifier;
use super::features::{FeatureExtractor, FeatureVector};
use crate::error::VocabError;
use crate::ledger::WordRecord;
use crate::lexicon::LexicalEntry;

/// One word due for relearning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelearnItem {
    pub word: String,
    /// Probability that the learner still remembers the word
    pub probability: f64,
    pub definitions: Vec<String>,
}

/// A word that could not be scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedWord {
    pub word: String,
    pub reason: String,
}

impl SkippedWord {
    pub fn new(word: impl Into<String>, error: &VocabError) -> Self {
        Self {
            word: word.into(),
            reason: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelearnBatch {
    pub items: Vec<RelearnItem>,
    pub skipped: Vec<SkippedWord>,
}

pub struct RelearnSelector<'a> {
    classifier: &'a ForgettingClassifier,
    min_delta_time_days: f64,
}

impl<'a> RelearnSelector<'a> {
    pub fn new(classifier: &'a ForgettingClassifier, min_delta_time_days: f64) -> Self {
        Self {
            classifier,
            min_delta_time_days,
        }
    }

    /// Unlearnt records old enough to carry a forgetting signal
    pub fn eligible<'r>(
        &self,
        records: &'r [WordRecord],
        now: DateTime<Utc>,
    ) -> Vec<&'r WordRecord> {
        let extractor = FeatureExtractor::new(now);
        records
            .iter()
            .filter(|r| !r.is_word_learnt)
            .filter(|r| extractor.delta_time_days(r) >= self.min_delta_time_days)
            .collect()
    }

    pub fn select(
        &self,
        records: &[WordRecord],
        lexicon: &HashMap<String, LexicalEntry>,
        now: DateTime<Utc>,
        max_size: usize,
    ) -> RelearnBatch {
        let extractor = FeatureExtractor::new(now);
        let mut batch = RelearnBatch::default();

        let mut scored: Vec<(&WordRecord, &LexicalEntry)> = Vec::new();
        let mut features: Vec<FeatureVector> = Vec::new();

        for record in self.eligible(records, now) {
            let entry = match lexicon.get(&record.word) {
                Some(entry) => entry,
                None => {
                    let err = VocabError::missing(&record.word, "lexical entry");
                    log::warn!("Skipping '{}': {}", record.word, err);
                    batch.skipped.push(SkippedWord::new(&record.word, &err));
                    continue;
                }
            };

            match extractor.extract(record, entry) {
                Ok(vector) => {
                    scored.push((record, entry));
                    features.push(vector);
                }
                Err(err) => {
                    log::warn!("Skipping '{}': {}", record.word, err);
                    batch.skipped.push(SkippedWord::new(&record.word, &err));
                }
            }
        }

        let classifications = self.classifier.classify_batch(&features);

        let mut forgotten: Vec<RelearnItem> = scored
            .into_iter()
            .zip(classifications)
            .filter(|(_, c)| !c.is_remembered)
            .map(|((record, entry), c)| RelearnItem {
                word: record.word.clone(),
                probability: c.probability_remembered,
                definitions: entry.definitions.clone(),
            })
            .collect();

        forgotten.sort_by(|a, b| match a.probability.total_cmp(&b.probability) {
            Ordering::Equal => a.word.cmp(&b.word),
            other => other,
        });
        forgotten.truncate(max_size);

        batch.items = forgotten;
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::classifier::{ClassifierParameters, ModelParameters, ScalerParameters};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
    }

    /// Probability of remembering falls with days since last seen and
    /// rises with correct answers
    fn classifier() -> ForgettingClassifier {
        ForgettingClassifier::new(ClassifierParameters {
            scaler: ScalerParameters {
                mean: vec![0.0; 6],
                scale: vec![1.0; 6],
            },
            model: ModelParameters {
                coefficients: vec![-0.5, 0.8, -0.3, 0.0, 0.0, 0.0],
                intercept: 1.0,
                threshold: 0.5,
            },
        })
        .unwrap()
    }

    fn always_forgotten() -> ForgettingClassifier {
        ForgettingClassifier::new(ClassifierParameters {
            scaler: ScalerParameters {
                mean: vec![0.0; 6],
                scale: vec![1.0; 6],
            },
            model: ModelParameters {
                coefficients: vec![0.0; 6],
                intercept: -1.0,
                threshold: 0.5,
            },
        })
        .unwrap()
    }

    fn record(word: &str, age: Duration, seen: u32, correct: u32) -> WordRecord {
        WordRecord {
            word: word.to_string(),
            time_seen: now() - age,
            history_seen: seen,
            history_correct: correct,
            is_word_learnt: false,
        }
    }

    fn lexicon(words: &[&str]) -> HashMap<String, LexicalEntry> {
        words
            .iter()
            .map(|w| {
                let entry = LexicalEntry::new(*w, "A1")
                    .with_ratings(5.0, 8.0, 3.0)
                    .with_definition(format!("meaning of {}", w));
                (w.to_string(), entry)
            })
            .collect()
    }

    #[test]
    fn test_recent_records_are_excluded() {
        let classifier = always_forgotten();
        let selector = RelearnSelector::new(&classifier, 1.0);
        let records = vec![
            record("fresh", Duration::hours(12), 2, 0),
            record("stale", Duration::days(3), 2, 0),
        ];

        let batch = selector.select(&records, &lexicon(&["fresh", "stale"]), now(), 10);
        let words: Vec<&str> = batch.items.iter().map(|i| i.word.as_str()).collect();
        assert_eq!(words, vec!["stale"]);
    }

    #[test]
    fn test_batch_sorted_ascending_and_truncated() {
        let classifier = classifier();
        let selector = RelearnSelector::new(&classifier, 1.0);
        let records = vec![
            record("a", Duration::days(4), 3, 1),
            record("b", Duration::days(20), 5, 0),
            record("c", Duration::days(9), 2, 1),
            record("d", Duration::days(6), 6, 2),
        ];

        let batch = selector.select(&records, &lexicon(&["a", "b", "c", "d"]), now(), 3);

        assert_eq!(batch.items.len(), 3);
        for pair in batch.items.windows(2) {
            assert!(pair[0].probability <= pair[1].probability);
        }
        assert_eq!(batch.items[0].word, "b");
        assert!(batch.items.iter().all(|i| i.probability < 0.5));
        assert_eq!(batch.items[0].definitions, vec!["meaning of b"]);
    }

    #[test]
    fn test_remembered_words_are_dropped() {
        let classifier = classifier();
        let selector = RelearnSelector::new(&classifier, 1.0);
        // z = -0.5 * 1.5 + 0.8 * 4 + 1.0 > 0, remembered
        let records = vec![record("solid", Duration::hours(36), 4, 4)];

        let batch = selector.select(&records, &lexicon(&["solid"]), now(), 10);
        assert!(batch.items.is_empty());
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_learnt_records_are_ignored() {
        let classifier = always_forgotten();
        let selector = RelearnSelector::new(&classifier, 1.0);
        let mut learnt = record("done", Duration::days(30), 9, 9);
        learnt.is_word_learnt = true;

        let batch = selector.select(&[learnt], &lexicon(&["done"]), now(), 10);
        assert!(batch.items.is_empty());
    }

    #[test]
    fn test_failures_do_not_abort_batch() {
        let classifier = always_forgotten();
        let selector = RelearnSelector::new(&classifier, 1.0);

        let mut lex = lexicon(&["ok", "partial"]);
        if let Some(entry) = lex.get_mut("partial") {
            entry.concreteness = None;
        }
        let records = vec![
            record("ok", Duration::days(2), 1, 0),
            record("partial", Duration::days(2), 1, 0),
            record("unknown", Duration::days(2), 1, 0),
        ];

        let batch = selector.select(&records, &lex, now(), 10);
        assert_eq!(batch.items.len(), 1);
        assert_eq!(batch.items[0].word, "ok");

        let skipped: Vec<&str> = batch.skipped.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(skipped, vec!["partial", "unknown"]);
        assert!(batch.skipped[0].reason.contains("concreteness"));
    }

    #[test]
    fn test_empty_input_gives_empty_batch() {
        let classifier = classifier();
        let selector = RelearnSelector::new(&classifier, 1.0);
        let batch = selector.select(&[], &HashMap::new(), now(), 10);
        assert_eq!(batch, RelearnBatch::default());
    }

    #[test]
    fn test_ties_break_by_word() {
        let classifier = always_forgotten();
        let selector = RelearnSelector::new(&classifier, 1.0);
        let records = vec![
            record("pear", Duration::days(2), 1, 0),
            record("apple", Duration::days(5), 3, 1),
        ];

        let batch = selector.select(&records, &lexicon(&["pear", "apple"]), now(), 10);
        let words: Vec<&str> = batch.items.iter().map(|i| i.word.as_str()).collect();
        assert_eq!(words, vec!["apple", "pear"]);
    }
}
