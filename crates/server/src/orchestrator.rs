//! # Recommendation Orchestrator
//!
//! This module coordinates the entire recommendation pipeline:
//! 1. Validate the request
//! 2. Correct the raw customer attributes
//! 3. Expand the snapshot over the product catalog
//! 4. Join engagement history and the premium period
//! 5. Encode categorical features
//! 6. Score every candidate
//! 7. Keep the products above the threshold
//!
//! Every failure after validation, panics included, is caught once here,
//! logged, and answered with the generic error response.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use pipeline::{CategoricalEncoder, HistoricalFeatureJoiner, ScoredRow, Scorer, ThresholdFilter};
use sources::{CandidateExpander, ProductCatalog, SnapshotCorrector};

use crate::artifacts::Artifacts;
use crate::config::ArtifactPaths;
use crate::error::{PipelineError, Result};
use crate::request::{ErrorResponse, PredictionResponse, PredictionResult, RequestValidator};

/// Stages that depend on loaded artifacts
#[derive(Clone)]
struct Stages {
    expander: CandidateExpander,
    joiner: HistoricalFeatureJoiner,
    encoder: CategoricalEncoder,
    scorer: Scorer,
    threshold: ThresholdFilter,
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    validator: RequestValidator,
    corrector: SnapshotCorrector,
    /// `None` when artifacts failed to load
    stages: Option<Arc<Stages>>,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over the standard product catalog
    pub fn new(artifacts: Artifacts) -> Self {
        Self::with_catalog(artifacts, ProductCatalog::standard())
    }

    pub fn with_catalog(artifacts: Artifacts, catalog: ProductCatalog) -> Self {
        let has_history = artifacts.has_history();
        let stages = Stages {
            expander: CandidateExpander::new(Arc::new(catalog)),
            joiner: HistoricalFeatureJoiner::new(artifacts.history),
            encoder: CategoricalEncoder::new(artifacts.encoders),
            scorer: Scorer::new(artifacts.classifier),
            threshold: ThresholdFilter::new(),
        };
        info!(
            classifier = stages.scorer.classifier_name(),
            products = stages.expander.catalog().len(),
            has_history,
            "Recommendation pipeline ready"
        );

        Self {
            validator: RequestValidator::new(),
            corrector: SnapshotCorrector::new(),
            stages: Some(Arc::new(stages)),
        }
    }

    /// An orchestrator without artifacts; every valid request gets the
    /// generic error response.
    pub fn degraded() -> Self {
        Self {
            validator: RequestValidator::new(),
            corrector: SnapshotCorrector::new(),
            stages: None,
        }
    }

    /// Load artifacts and build the orchestrator, failing on artifact errors.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        Ok(Self::new(Artifacts::load(paths)?))
    }

    /// Load artifacts, falling back to a degraded orchestrator on failure.
    pub fn load_or_degraded(paths: &ArtifactPaths) -> Self {
        match Self::load(paths) {
            Ok(orchestrator) => orchestrator,
            Err(err) => {
                error!("Artifact loading failed, starting degraded: {}", err);
                Self::degraded()
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.stages.is_none()
    }

    /// `true` when the engagement history is joined; `false` when degraded
    /// or when every count falls back to 0.
    pub fn has_history(&self) -> bool {
        self.stages
            .as_ref()
            .is_some_and(|stages| stages.joiner.has_history())
    }

    /// Main entry point: answer one request.
    ///
    /// Never fails; errors are turned into structured error responses.
    #[instrument(skip_all)]
    pub fn handle(&self, request: &Value) -> PredictionResponse {
        let start_time = Instant::now();

        let valid = match self.validator.validate(request) {
            Ok(valid) => valid,
            Err(missing) => {
                warn!("Rejected request, missing keys: {:?}", missing);
                return ErrorResponse::invalid_parameters(request).into();
            }
        };
        info!("Predicting for user_id {}", valid.user_id);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.recommend(valid.model_params)))
            .unwrap_or_else(|payload| Err(PipelineError::Panic(panic_message(payload.as_ref()))));

        match outcome {
            Ok(products) => {
                info!(
                    "Recommended {} products for user_id {} in {:.2?}",
                    products.len(),
                    valid.user_id,
                    start_time.elapsed()
                );
                PredictionResult {
                    user_id: valid.user_id.clone(),
                    products,
                }
                .into()
            }
            Err(err) => {
                error!("Error while handling request for user_id {}: {}", valid.user_id, err);
                ErrorResponse::generic().into()
            }
        }
    }

    /// Answer one request on tokio's blocking pool.
    pub async fn handle_async(&self, request: Value) -> PredictionResponse {
        let orchestrator = self.clone();
        match tokio::task::spawn_blocking(move || orchestrator.handle(&request)).await {
            Ok(response) => response,
            Err(join_err) => {
                error!("{}", PipelineError::from(join_err));
                ErrorResponse::generic().into()
            }
        }
    }

    /// Products recommended for one customer record, in catalog order.
    pub fn recommend(&self, model_params: &Value) -> Result<Vec<String>> {
        let scored = self.score_candidates(model_params)?;
        let stages = self.stages()?;
        stages
            .threshold
            .recommend(scored)
            .map_err(|err| PipelineError::stage("threshold", err))
    }

    /// Every candidate product with its probability, in catalog order.
    pub fn score_candidates(&self, model_params: &Value) -> Result<Vec<ScoredRow>> {
        let stages = self.stages()?;
        let raw = model_params
            .as_object()
            .ok_or(PipelineError::InvalidParams(json_kind(model_params)))?;

        let snapshot = self.corrector.correct(raw);
        let rows = stages.expander.expand(snapshot);
        let enriched = stages.joiner.join(rows);
        let encoded = stages
            .encoder
            .encode(enriched)
            .map_err(|err| PipelineError::stage("encode", err))?;
        let scored = stages
            .scorer
            .score(encoded)
            .map_err(|err| PipelineError::stage("score", err))?;

        debug!("Scored {} candidates", scored.len());
        Ok(scored)
    }

    fn stages(&self) -> Result<&Stages> {
        self.stages.as_deref().ok_or(PipelineError::Degraded)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
