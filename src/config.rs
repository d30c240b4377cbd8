//! Engine configuration
//!
//! Read from a TOML file; every key is optional.
//!
//! ```toml
//! min_delta_time_days = 1.0
//! learnt_threshold = 5
//! max_batch_size = 20
//! levels = ["A1", "A2", "B1", "B2", "C1", "C2"]
//! classifier_path = "/path/to/classifier.json"
//!
//! [nlp]
//! base_url = "http://localhost:8080"
//! synonym_threshold = 0.55
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VocabError};
use crate::lexicon::LevelScale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Records seen more recently than this are never scored
    pub min_delta_time_days: f64,
    /// Correct answers and spacing in days required to learn a word
    pub learnt_threshold: u32,
    /// Batch size when the caller does not ask for one
    pub max_batch_size: usize,
    /// Proficiency levels, easiest first
    pub levels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlp: Option<NlpConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_delta_time_days: 1.0,
            learnt_threshold: 5,
            max_batch_size: 20,
            levels: LevelScale::default().levels().to_vec(),
            classifier_path: None,
            nlp: None,
        }
    }
}

/// Remote next-word prediction and similarity service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpConfig {
    pub base_url: String,
    #[serde(default = "default_synonym_threshold")]
    pub synonym_threshold: f32,
    #[serde(default = "default_suggestion_count")]
    pub suggestion_count: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_synonym_threshold() -> f32 {
    0.55
}

fn default_suggestion_count() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    10
}

impl EngineConfig {
    pub const FILE_NAME: &'static str = "relearn.toml";

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| VocabError::Config(format!("cannot read {:?}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    /// Load `relearn.toml` from the data directory, falling back to defaults
    pub fn load_or_default(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(Self::FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| VocabError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_delta_time_days.is_finite() || self.min_delta_time_days < 0.0 {
            return Err(VocabError::Config(format!(
                "min_delta_time_days must be a non-negative number, got {}",
                self.min_delta_time_days
            )));
        }
        if self.learnt_threshold == 0 {
            return Err(VocabError::Config("learnt_threshold must be at least 1".to_string()));
        }
        if self.max_batch_size == 0 {
            return Err(VocabError::Config("max_batch_size must be at least 1".to_string()));
        }
        if let Some(nlp) = &self.nlp {
            if nlp.base_url.trim().is_empty() {
                return Err(VocabError::Config("nlp.base_url must not be empty".to_string()));
            }
        }
        self.level_scale()?;
        Ok(())
    }

    pub fn level_scale(&self) -> Result<LevelScale> {
        LevelScale::new(self.levels.clone())
    }

    /// Configured artifact path, or `classifier.json` in the data directory
    pub fn classifier_path(&self, data_dir: &Path) -> PathBuf {
        self.classifier_path
            .clone()
            .unwrap_or_else(|| data_dir.join("classifier.json"))
    }
}
