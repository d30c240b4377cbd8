//! Reference lexicon: per-word lexical metadata and the level ordering
//!
//! The lexicon is read-only to the engine. It is populated once by the
//! CSV importer and afterwards only queried.

pub mod import;
pub mod models;

pub use import::{parse_lexicon_csv, ImportReport};
pub use models::*;
