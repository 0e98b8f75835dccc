//! Errors raised inside the recommendation pipeline.
//!
//! None of these reach the caller: the orchestrator logs them and answers with
//! the generic error response.

use ml_model::ModelError;
use thiserror::Error;

/// Failures of a single request or of artifact loading
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Model artifacts are not loaded; the service is running degraded")]
    Degraded,

    #[error("Failed to load model artifacts: {0}")]
    Artifact(#[from] ModelError),

    #[error("model_params must be a JSON object, got {0}")]
    InvalidParams(&'static str),

    #[error("Stage '{stage}' failed: {reason}")]
    Stage { stage: &'static str, reason: String },

    #[error("Pipeline panicked: {0}")]
    Panic(String),

    #[error("Pipeline worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl PipelineError {
    /// Wrap a stage failure, keeping the whole context chain in the message.
    pub fn stage(stage: &'static str, err: anyhow::Error) -> Self {
        PipelineError::Stage {
            stage,
            reason: format!("{:#}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
