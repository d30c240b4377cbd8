//! Forgetting prediction and relearn selection
//!
//! This module provides:
//! - Feature extraction from a word record and its lexical metadata
//! - The frozen logistic-regression classifier and its artifact loader
//! - Selection and ordering of the relearn batch

pub mod classifier;
pub mod features;
pub mod selector;

pub use classifier::{
    Classification, ClassifierArtifactLoader, ClassifierParameters, ForgettingClassifier,
    JsonArtifactLoader, ModelParameters, ScalerParameters,
};
pub use features::{delta_time_days, FeatureExtractor, FeatureVector, FEATURE_COUNT};
pub use selector::{RelearnBatch, RelearnItem, RelearnSelector, SkippedWord};
