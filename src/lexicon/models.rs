//! Data models for the reference lexicon

use serde::{Deserialize, Serialize};

use crate::error::{Result, VocabError};

/// Lexical metadata for one vocabulary item
///
/// The three numeric ratings are optional because the source tables are
/// incomplete; scoring a word with a missing rating is a reported error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexicalEntry {
    pub word: String,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_of_acquisition: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concreteness: Option<f64>,
    #[serde(default)]
    pub definitions: Vec<String>,
}

impl LexicalEntry {
    pub fn new(word: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            level: level.into(),
            age_of_acquisition: None,
            log_frequency: None,
            concreteness: None,
            definitions: Vec::new(),
        }
    }

    pub fn with_ratings(mut self, aoa: f64, log_frequency: f64, concreteness: f64) -> Self {
        self.age_of_acquisition = Some(aoa);
        self.log_frequency = Some(log_frequency);
        self.concreteness = Some(concreteness);
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definitions.push(definition.into());
        self
    }
}

/// Total order of proficiency levels, easiest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelScale {
    levels: Vec<String>,
}

impl LevelScale {
    pub fn new(levels: Vec<String>) -> Result<Self> {
        if levels.is_empty() {
            return Err(VocabError::Config("level list is empty".to_string()));
        }
        for (i, level) in levels.iter().enumerate() {
            if level.trim().is_empty() {
                return Err(VocabError::Config("level names must not be blank".to_string()));
            }
            if levels[..i].contains(level) {
                return Err(VocabError::Config(format!("level '{}' listed twice", level)));
            }
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn position(&self, level: &str) -> Option<usize> {
        self.levels.iter().position(|l| l == level)
    }

    /// Every level strictly easier than `level`
    pub fn below(&self, level: &str) -> Result<&[String]> {
        let idx = self.position(level).ok_or_else(|| {
            VocabError::Validation(format!(
                "unknown level '{}', expected one of: {}",
                level,
                self.levels.join(", ")
            ))
        })?;
        Ok(&self.levels[..idx])
    }
}

impl Default for LevelScale {
    fn default() -> Self {
        Self {
            levels: ["A1", "A2", "B1", "B2", "C1", "C2"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
