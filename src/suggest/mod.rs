//! Next-word suggestions narrowed to the learner's vocabulary
//!
//! Prediction and similarity are external services. This module only
//! combines them: each predicted word is paired with the words of the
//! learner's not-yet-learnt pool that the similarity service rates above a
//! threshold.

mod http;

pub use http::HttpNlpClient;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub trait NextWordPredictor {
    /// Most likely next words for `text`, best first
    fn predict_next_words(&self, text: &str, n: usize) -> Result<Vec<String>>;
}

pub trait SimilarityScorer {
    /// Semantic similarity of two words, or `None` when the service declines
    /// to compare them (e.g. determiners and pronouns)
    fn similarity(&self, a: &str, b: &str) -> Result<Option<f32>>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestOptions {
    pub count: usize,
    pub threshold: f32,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            count: 3,
            threshold: 0.55,
        }
    }
}

/// A predicted word and the pool words similar to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub word: String,
    pub synonyms: Vec<String>,
}

/// Pool words whose similarity to `word` is strictly above `threshold`
pub fn synonyms_in_pool(
    word: &str,
    pool: &[String],
    threshold: f32,
    scorer: &dyn SimilarityScorer,
) -> Vec<String> {
    pool.iter()
        .filter(|candidate| match scorer.similarity(word, candidate) {
            Ok(Some(score)) => score > threshold,
            Ok(None) => false,
            Err(e) => {
                log::warn!("Similarity of '{}' and '{}' failed: {}", word, candidate, e);
                false
            }
        })
        .cloned()
        .collect()
}

pub fn suggest_with_synonyms(
    text: &str,
    pool: &[String],
    predictor: &dyn NextWordPredictor,
    scorer: &dyn SimilarityScorer,
    options: SuggestOptions,
) -> Result<Vec<Suggestion>> {
    let predictions = predictor.predict_next_words(text, options.count)?;

    Ok(predictions
        .into_iter()
        .map(|word| {
            let synonyms = synonyms_in_pool(&word, pool, options.threshold, scorer);
            Suggestion { word, synonyms }
        })
        .collect())
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::fakes::{FixedPredictor, TableScorer};
    use super::*;

    fn pool(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn scorer() -> TableScorer {
        TableScorer {
            scores: HashMap::from([
                (("big", "huge"), 0.8),
                (("big", "large"), 0.55),
                (("fast", "rapid"), 0.9),
            ]),
            declined: vec!["the"],
            failing: vec!["broken"],
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let synonyms = synonyms_in_pool("big", &pool(&["huge", "large", "rapid"]), 0.55, &scorer());
        assert_eq!(synonyms, vec!["huge"]);
    }

    #[test]
    fn test_declined_and_failed_comparisons_are_skipped() {
        let synonyms = synonyms_in_pool("big", &pool(&["the", "broken", "huge"]), 0.1, &scorer());
        assert_eq!(synonyms, vec!["huge"]);
    }

    #[test]
    fn test_every_prediction_is_reported_in_order() {
        let predictor = FixedPredictor(vec!["fast", "the", "big", "slow"]);
        let suggestions = suggest_with_synonyms(
            "the car is",
            &pool(&["huge", "rapid"]),
            &predictor,
            &scorer(),
            SuggestOptions::default(),
        )
        .unwrap();

        assert_eq!(
            suggestions,
            vec![
                Suggestion { word: "fast".into(), synonyms: vec!["rapid".into()] },
                Suggestion { word: "the".into(), synonyms: vec![] },
                Suggestion { word: "big".into(), synonyms: vec!["huge".into()] },
            ]
        );
    }
}
