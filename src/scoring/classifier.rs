//! Frozen logistic-regression classifier for "remembered" vs "forgotten"
//!
//! probability_remembered = sigmoid(coefficients · ((x - mean) / scale) + intercept)
//! is_remembered          = probability_remembered >= threshold
//!
//! The parameters come from an offline training run and never change while
//! the process is alive.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::features::{FeatureVector, FEATURE_COUNT};
use crate::error::{Result, VocabError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParameters {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub threshold: f64,
}

/// Trained classifier artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierParameters {
    pub scaler: ScalerParameters,
    pub model: ModelParameters,
}

/// Source of the trained parameters. Failure here is fatal for the process.
pub trait ClassifierArtifactLoader {
    fn load(&self) -> Result<ClassifierParameters>;
}

/// Reads the artifact from a JSON file
pub struct JsonArtifactLoader {
    path: PathBuf,
}

impl JsonArtifactLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ClassifierArtifactLoader for JsonArtifactLoader {
    fn load(&self) -> Result<ClassifierParameters> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            VocabError::ClassifierUnavailable(format!("cannot read {:?}: {}", self.path, e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            VocabError::ClassifierUnavailable(format!("malformed artifact {:?}: {}", self.path, e))
        })
    }
}

/// Score of one feature vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub probability_remembered: f64,
    pub is_remembered: bool,
}

#[derive(Debug, Clone)]
pub struct ForgettingClassifier {
    mean: FeatureVector,
    scale: FeatureVector,
    coefficients: FeatureVector,
    intercept: f64,
    threshold: f64,
}

impl ForgettingClassifier {
    pub fn new(params: ClassifierParameters) -> Result<Self> {
        let mean = fixed(&params.scaler.mean, "scaler mean")?;
        let scale = fixed(&params.scaler.scale, "scaler scale")?;
        let coefficients = fixed(&params.model.coefficients, "coefficients")?;
        let ModelParameters {
            intercept,
            threshold,
            ..
        } = params.model;

        if scale.iter().any(|s| *s == 0.0) {
            return Err(unavailable("scaler scale contains zero"));
        }
        if !intercept.is_finite() {
            return Err(unavailable("intercept is not finite"));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(unavailable(&format!("threshold {} outside [0, 1]", threshold)));
        }

        Ok(Self {
            mean,
            scale,
            coefficients,
            intercept,
            threshold,
        })
    }

    pub fn from_loader(loader: &dyn ClassifierArtifactLoader) -> Result<Self> {
        let classifier = Self::new(loader.load()?)?;
        log::info!(
            "Loaded forgetting classifier (threshold {:.3})",
            classifier.threshold
        );
        Ok(classifier)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn standardize(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, value) in out.iter_mut().enumerate() {
            *value = (features[i] - self.mean[i]) / self.scale[i];
        }
        out
    }

    pub fn probability_remembered(&self, features: &FeatureVector) -> f64 {
        let standardized = self.standardize(features);
        let z = self
            .coefficients
            .iter()
            .zip(standardized.iter())
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }

    pub fn classify(&self, features: &FeatureVector) -> Classification {
        let probability_remembered = self.probability_remembered(features);
        Classification {
            probability_remembered,
            is_remembered: probability_remembered >= self.threshold,
        }
    }

    pub fn classify_batch(&self, batch: &[FeatureVector]) -> Vec<Classification> {
        batch.iter().map(|features| self.classify(features)).collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn unavailable(reason: &str) -> VocabError {
    VocabError::ClassifierUnavailable(reason.to_string())
}

fn fixed(values: &[f64], name: &str) -> Result<FeatureVector> {
    let array: FeatureVector = values.try_into().map_err(|_| {
        unavailable(&format!(
            "{} has {} entries, expected {}",
            name,
            values.len(),
            FEATURE_COUNT
        ))
    })?;
    if array.iter().any(|v| !v.is_finite()) {
        return Err(unavailable(&format!("{} contains non-finite values", name)));
    }
    Ok(array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn params(coefficients: [f64; 6], intercept: f64, threshold: f64) -> ClassifierParameters {
        ClassifierParameters {
            scaler: ScalerParameters {
                mean: vec![0.0; 6],
                scale: vec![1.0; 6],
            },
            model: ModelParameters {
                coefficients: coefficients.to_vec(),
                intercept,
                threshold,
            },
        }
    }

    #[test]
    fn test_degenerate_parameters_always_forget() {
        let classifier = ForgettingClassifier::new(params([0.0; 6], -1.0, 0.5)).unwrap();
        let inputs = [
            [0.0; 6],
            [100.0, 50.0, 0.0, 3.0, 12.0, 5.0],
            [-3.0, 0.0, 9.0, 1.0, 1.0, 1.0],
        ];

        for result in classifier.classify_batch(&inputs) {
            assert!(!result.is_remembered);
            assert!((result.probability_remembered - sigmoid(-1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_standardize() {
        let mut p = params([0.0; 6], 0.0, 0.5);
        p.scaler.mean = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        p.scaler.scale = vec![2.0; 6];
        let classifier = ForgettingClassifier::new(p).unwrap();

        let standardized = classifier.standardize(&[3.0, 2.0, 1.0, 4.0, 9.0, 6.0]);
        assert_eq!(standardized, [1.0, 0.0, -1.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_probability_uses_linear_decision_function() {
        let classifier =
            ForgettingClassifier::new(params([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0.5, 0.5)).unwrap();
        let p = classifier.probability_remembered(&[1.5, 9.0, 9.0, 9.0, 9.0, 9.0]);
        assert!((p - sigmoid(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_monotone() {
        // Longer gaps lower the probability of remembering.
        let classifier =
            ForgettingClassifier::new(params([-0.8, 0.6, -0.4, 0.0, 0.1, 0.0], 1.0, 0.5)).unwrap();

        let mut results: Vec<Classification> = (0..60)
            .map(|days| classifier.classify(&[days as f64 * 0.25, 2.0, 1.0, 4.0, 8.0, 3.0]))
            .collect();
        results.sort_by(|a, b| a.probability_remembered.total_cmp(&b.probability_remembered));

        for pair in results.windows(2) {
            assert!(pair[1].is_remembered || !pair[0].is_remembered);
        }
        assert!(results.iter().any(|r| r.is_remembered));
        assert!(results.iter().any(|r| !r.is_remembered));
    }

    #[test]
    fn test_probability_at_threshold_is_remembered() {
        let classifier = ForgettingClassifier::new(params([0.0; 6], 0.0, 0.5)).unwrap();
        let result = classifier.classify(&[0.0; 6]);
        assert_eq!(result.probability_remembered, 0.5);
        assert!(result.is_remembered);
    }

    #[test]
    fn test_sigmoid_is_stable_for_large_inputs() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut short = params([0.0; 6], 0.0, 0.5);
        short.model.coefficients.pop();
        assert!(matches!(
            ForgettingClassifier::new(short),
            Err(VocabError::ClassifierUnavailable(_))
        ));

        let mut zero_scale = params([0.0; 6], 0.0, 0.5);
        zero_scale.scaler.scale[2] = 0.0;
        assert!(ForgettingClassifier::new(zero_scale).is_err());

        assert!(ForgettingClassifier::new(params([0.0; 6], 0.0, 1.5)).is_err());
        let nan = params([f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0], 0.0, 0.5);
        assert!(ForgettingClassifier::new(nan).is_err());
    }

    #[test]
    fn test_json_loader() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("classifier.json");
        std::fs::write(&path, serde_json::to_string(&params([0.1; 6], 0.2, 0.4)).unwrap()).unwrap();

        let classifier = ForgettingClassifier::from_loader(&JsonArtifactLoader::new(path)).unwrap();
        assert_eq!(classifier.threshold(), 0.4);
    }

    #[test]
    fn test_json_loader_failures_are_fatal_errors() {
        let temp = TempDir::new().unwrap();
        let missing = JsonArtifactLoader::new(temp.path().join("absent.json"));
        assert!(matches!(
            ForgettingClassifier::from_loader(&missing),
            Err(VocabError::ClassifierUnavailable(_))
        ));

        let path = temp.path().join("broken.json");
        std::fs::write(&path, r#"{"scaler": {"mean": [0.0]}}"#).unwrap();
        assert!(matches!(
            ForgettingClassifier::from_loader(&JsonArtifactLoader::new(path)),
            Err(VocabError::ClassifierUnavailable(_))
        ));
    }
}
