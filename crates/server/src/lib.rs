//! Server crate for the product recommendation service.
//!
//! This crate contains the orchestrator that runs the full pipeline for one
//! request, together with request validation, artifact loading and service
//! configuration. Transport (HTTP or otherwise) is left to the host process:
//! it hands `handle` or `handle_async` a JSON request and returns the JSON
//! response as-is.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod request;

pub use artifacts::Artifacts;
pub use config::{ArtifactPaths, ServiceConfig};
pub use error::{PipelineError, Result};
pub use orchestrator::RecommendationOrchestrator;
pub use request::{ErrorResponse, PredictionResponse, PredictionResult, RequestValidator};
