//! Engine facade
//!
//! Wires a store, the shared classifier and the configuration into the
//! operations exposed to callers. Every operation is a single synchronous
//! request; the classifier is shared read-only between engines and threads.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::error::{Result, VocabError};
use crate::ledger::{
    AddOutcome, BootstrapReport, LevelBootstrapper, RepetitionOutcome, VocabularyLedger,
    WordRecord,
};
use crate::lexicon::{LevelScale, LexicalEntry};
use crate::scoring::{ForgettingClassifier, RelearnBatch, RelearnSelector, SkippedWord};
use crate::store::VocabularyStore;
use crate::suggest::{
    suggest_with_synonyms, NextWordPredictor, SimilarityScorer, SuggestOptions, Suggestion,
};

pub struct Engine<S: VocabularyStore> {
    store: S,
    classifier: Arc<ForgettingClassifier>,
    config: EngineConfig,
    levels: LevelScale,
    clock: fn() -> DateTime<Utc>,
}

impl<S: VocabularyStore> Engine<S> {
    pub fn new(
        store: S,
        classifier: Arc<ForgettingClassifier>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let levels = config.level_scale()?;
        Ok(Self {
            store,
            classifier,
            config,
            levels,
            clock: Utc::now,
        })
    }

    /// Replace the wall clock, e.g. with a fixed instant
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn ledger(&self) -> VocabularyLedger<'_, S> {
        VocabularyLedger::new(&self.store, self.config.learnt_threshold)
    }

    /// Words most at risk of being forgotten, most urgent first
    pub fn get_relearn_batch(
        &self,
        user_id: &str,
        max_size: Option<usize>,
    ) -> Result<RelearnBatch> {
        let user_id = validate_user_id(user_id)?;
        let max_size = match max_size {
            Some(0) => {
                return Err(VocabError::Validation("max_size must be at least 1".to_string()))
            }
            Some(n) => n,
            None => self.config.max_batch_size,
        };

        let now = (self.clock)();
        let records = self.ledger().learning_records(user_id)?;
        let selector = RelearnSelector::new(&self.classifier, self.config.min_delta_time_days);

        let eligible = selector.eligible(&records, now);
        let words: Vec<String> = eligible.iter().map(|r| r.word.clone()).collect();
        let (lexicon, mut lookup_failures) = self.lexical_entries(&words);

        let failed: HashSet<&str> = lookup_failures.iter().map(|s| s.word.as_str()).collect();
        let scorable: Vec<WordRecord> = eligible
            .into_iter()
            .filter(|r| !failed.contains(r.word.as_str()))
            .cloned()
            .collect();

        let mut batch = selector.select(&scorable, &lexicon, now, max_size);
        lookup_failures.append(&mut batch.skipped);
        batch.skipped = lookup_failures;

        log::debug!(
            "Relearn batch for {}: {} of {} learning words, {} skipped",
            user_id,
            batch.items.len(),
            records.len(),
            batch.skipped.len()
        );

        Ok(batch)
    }

    /// One batched lexicon lookup. When it fails, each word is looked up on
    /// its own so a bad entry only costs that word.
    fn lexical_entries(
        &self,
        words: &[String],
    ) -> (HashMap<String, LexicalEntry>, Vec<SkippedWord>) {
        match self.store.get_lexical_entries(words) {
            Ok(entries) => return (entries, Vec::new()),
            Err(e) => log::warn!("Batched lexicon lookup failed, retrying per word: {}", e),
        }

        let mut entries = HashMap::new();
        let mut failures = Vec::new();
        for word in words {
            match self.store.get_lexical_entry(word) {
                Ok(Some(entry)) => {
                    entries.insert(word.clone(), entry);
                }
                Ok(None) => {}
                Err(e) => {
                    let err = VocabError::from(e);
                    log::warn!("Lexicon lookup for '{}' failed: {}", word, err);
                    failures.push(SkippedWord::new(word, &err));
                }
            }
        }
        (entries, failures)
    }

    pub fn record_repetition_result(
        &self,
        user_id: &str,
        word: &str,
        success: bool,
    ) -> Result<RepetitionOutcome> {
        let user_id = validate_user_id(user_id)?;
        self.ledger().record_repetition(user_id, word, success, (self.clock)())
    }

    /// Record the learner's level and bootstrap all easier vocabulary
    pub fn assign_level(&self, user_id: &str, level: &str) -> Result<BootstrapReport> {
        let user_id = validate_user_id(user_id)?;
        LevelBootstrapper::new(&self.store, &self.levels).assign_level(
            user_id,
            level,
            (self.clock)(),
        )
    }

    pub fn add_new_word(&self, user_id: &str, word: &str) -> Result<AddOutcome> {
        let user_id = validate_user_id(user_id)?;
        self.ledger().add_word(user_id, word, (self.clock)())
    }

    pub fn mark_word_known(&self, user_id: &str, word: &str) -> Result<WordRecord> {
        let user_id = validate_user_id(user_id)?;
        self.ledger().mark_known(user_id, word, (self.clock)())
    }

    /// Words the learner has not learnt yet, in ledger order
    pub fn learning_vocabulary(&self, user_id: &str) -> Result<Vec<String>> {
        let user_id = validate_user_id(user_id)?;
        Ok(self
            .ledger()
            .learning_records(user_id)?
            .into_iter()
            .map(|r| r.word)
            .collect())
    }

    /// Predict the next words for `text` and pair each with similar words the
    /// learner is still learning
    pub fn suggest_next_words(
        &self,
        user_id: &str,
        text: &str,
        predictor: &dyn NextWordPredictor,
        scorer: &dyn SimilarityScorer,
        options: SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        if text.trim().is_empty() {
            return Err(VocabError::Validation("text must not be blank".to_string()));
        }
        let pool = self.learning_vocabulary(user_id)?;
        suggest_with_synonyms(text, &pool, predictor, scorer, options)
    }
}

fn validate_user_id(user_id: &str) -> Result<&str> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(VocabError::Validation("user id must not be blank".to_string()));
    }
    Ok(user_id)
}
