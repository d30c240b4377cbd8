//! Spaced-repetition decision engine: which words a learner should see
//! again, and how their vocabulary ledger moves from new to learnt.

pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod lexicon;
pub mod scoring;
pub mod store;
pub mod suggest;

pub use config::{EngineConfig, NlpConfig};
pub use engine::Engine;
pub use error::{Result, VocabError};
pub use ledger::{AddOutcome, BootstrapReport, RepetitionOutcome, WordRecord, WordState};
pub use lexicon::{LevelScale, LexicalEntry};
pub use scoring::{ForgettingClassifier, JsonArtifactLoader, RelearnBatch, RelearnItem};
pub use store::{JsonFileStore, VocabularyStore};
pub use suggest::{HttpNlpClient, SuggestOptions, Suggestion};
