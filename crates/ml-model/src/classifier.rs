//! Binary classifiers that turn a feature row into an acquisition probability.

use crate::artifact::read_json_artifact;
use crate::error::{ModelError, Result};
use crate::features::MODEL_FEATURES;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A trained binary classifier.
///
/// `Send + Sync` because one loaded model is shared by every request thread;
/// scoring takes `&self` and must not mutate the model.
pub trait Classifier: Send + Sync {
    /// Returns the name of this classifier (for logging/debugging)
    fn name(&self) -> &str;

    /// Probability of the positive class for one dense row in
    /// [`MODEL_FEATURES`] order.
    fn predict_proba(&self, row: &[f64]) -> Result<f64>;
}

/// Serialized form of the logistic regression artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionArtifact {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Logistic regression over the fixed feature order.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    /// Validate an artifact against the pipeline's feature contract.
    pub fn from_artifact(artifact: LogisticRegressionArtifact) -> Result<Self> {
        if artifact.feature_names.iter().map(String::as_str).ne(MODEL_FEATURES) {
            return Err(ModelError::FeatureOrderMismatch {
                expected: MODEL_FEATURES.iter().map(|name| name.to_string()).collect(),
                found: artifact.feature_names,
            });
        }
        if artifact.coefficients.len() != MODEL_FEATURES.len() {
            return Err(ModelError::DimensionMismatch {
                expected: MODEL_FEATURES.len(),
                found: artifact.coefficients.len(),
            });
        }
        if !artifact.intercept.is_finite() || artifact.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidModel(
                "logistic regression parameters must be finite".to_string(),
            ));
        }

        Ok(Self {
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
        })
    }

    /// Load the model artifact from disk.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let artifact: LogisticRegressionArtifact = read_json_artifact(path)?;
        let model = Self::from_artifact(artifact)?;
        info!("Loaded logistic regression model from {}", path.display());
        Ok(model)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &str {
        "LogisticRegression"
    }

    fn predict_proba(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                found: row.len(),
            });
        }

        let logit = self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(weight, value)| weight * value)
                .sum::<f64>();
        Ok(sigmoid(logit))
    }
}

/// Numerically stable logistic function
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
