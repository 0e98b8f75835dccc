//! Trained artifacts consumed by the recommendation pipeline.
//!
//! This crate owns the contract with the offline training job:
//! - the fixed feature order the classifier was trained on
//! - type normalization of categorical values before encoding
//! - per-feature encoder tables with their unseen-category fallback
//! - the classifier that maps a feature row to an acquisition probability
//!
//! Artifacts are loaded once at startup and never mutated afterwards, so they
//! can be shared across request threads behind an `Arc` without locking.

pub mod artifact;
pub mod category;
pub mod classifier;
pub mod encoder;
pub mod error;
pub mod features;

pub use category::{normalize_column, CategoryValue, MISSING_CODE, MISSING_LABEL};
pub use classifier::{sigmoid, Classifier, LogisticRegression, LogisticRegressionArtifact};
pub use encoder::{EncoderSet, EncoderTable};
pub use error::{ModelError, Result};
pub use features::{feature_index, FeatureVector, CATEGORICAL_FEATURES, MODEL_FEATURES};
