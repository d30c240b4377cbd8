use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use relearn_lib::scoring::{ForgettingClassifier, JsonArtifactLoader};
use relearn_lib::{Engine, EngineConfig, JsonFileStore};

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub config: EngineConfig,
}

impl App {
    /// Resolve the data directory and load the config
    pub fn new(data_dir: Option<PathBuf>, config_path: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => JsonFileStore::default_data_dir().context("Failed to get data directory")?,
        };

        let config = match config_path {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => EngineConfig::load_or_default(&data_dir)
                .context("Failed to load config from data directory")?,
        };

        Ok(Self { data_dir, config })
    }

    /// Store rooted at the data directory, created on first use
    pub fn store(&self) -> Result<JsonFileStore> {
        let store = JsonFileStore::new(self.data_dir.clone());
        store.init().context("Failed to initialize data directory")?;
        Ok(store)
    }

    /// Engine with the classifier loaded from the configured artifact
    pub fn engine(&self) -> Result<Engine<JsonFileStore>> {
        let path = self.config.classifier_path(&self.data_dir);
        let loader = JsonArtifactLoader::new(path.clone());
        let classifier = ForgettingClassifier::from_loader(&loader)
            .with_context(|| format!("Failed to load classifier from {}", path.display()))?;

        Engine::new(self.store()?, Arc::new(classifier), self.config.clone())
            .context("Invalid engine configuration")
    }
}
