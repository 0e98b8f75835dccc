//! Errors raised while loading or applying the trained artifacts.

use thiserror::Error;

/// Errors that can occur when loading or evaluating model artifacts
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read artifact {path}: {source}")]
    ArtifactIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {source}")]
    ArtifactFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model feature order mismatch: expected {expected:?}, found {found:?}")]
    FeatureOrderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("No encoder table for categorical feature '{0}'")]
    MissingEncoder(String),

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("Expected {expected} features but got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Classifier returned {score} for row {row}, outside [0, 1]")]
    InvalidScore { row: usize, score: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
