//! End-to-end tests over artifacts loaded from disk.

mod common;

use serde_json::json;
use server::{ArtifactPaths, ErrorResponse, PredictionResponse, RecommendationOrchestrator};
use sources::sample;
use std::fs;

#[test]
fn test_reference_request_from_deployment() {
    let deployment = common::create_deployment();
    let orchestrator =
        RecommendationOrchestrator::load(&ArtifactPaths::from_base_dir(deployment.path())).unwrap();
    // the quoted source column holds a comma; the history must still load
    assert!(orchestrator.has_history());

    let response = orchestrator.handle(&sample::reference_request());
    assert_eq!(
        response.to_json(),
        json!({
            "user_id": 1375586,
            "products": ["ind_cco_fin_ult1", "ind_recibo_ult1"],
        })
    );
}

#[test]
fn test_missing_history_still_answers() {
    let deployment = common::create_deployment();
    fs::remove_file(deployment.path().join("data/df_long_cumsum.csv")).unwrap();

    let orchestrator =
        RecommendationOrchestrator::load(&ArtifactPaths::from_base_dir(deployment.path())).unwrap();
    assert!(!orchestrator.is_degraded());
    assert!(!orchestrator.has_history());

    let response = orchestrator.handle(&sample::reference_request());
    assert_eq!(response.products().unwrap(), ["ind_cco_fin_ult1"]);

    let scored = orchestrator.score_candidates(&sample::reference_record()).unwrap();
    assert_eq!(scored.len(), 13);
}

#[test]
fn test_missing_encoders_degrades() {
    let deployment = common::create_deployment();
    fs::remove_file(deployment.path().join("models/dict_encoders.json")).unwrap();
    let paths = ArtifactPaths::from_base_dir(deployment.path());

    assert!(RecommendationOrchestrator::load(&paths).is_err());

    let orchestrator = RecommendationOrchestrator::load_or_degraded(&paths);
    assert!(orchestrator.is_degraded());
    assert_eq!(
        orchestrator.handle(&sample::reference_request()),
        PredictionResponse::Error(ErrorResponse::generic())
    );
}

#[test]
fn test_reordered_model_features_fail_to_load() {
    let deployment = common::create_deployment();
    let mut model = common::model_artifact();
    model["feature_names"].as_array_mut().unwrap().swap(0, 1);
    common::write_json(&deployment.path().join("models/logreg_model.json"), &model);

    let result = RecommendationOrchestrator::load(&ArtifactPaths::from_base_dir(deployment.path()));
    assert!(result.is_err());
}

#[test]
fn test_path_overrides() {
    let deployment = common::create_deployment();
    let moved = deployment.path().join("elsewhere.csv");
    fs::rename(deployment.path().join("data/df_long_cumsum.csv"), &moved).unwrap();

    let paths = ArtifactPaths::from_base_dir(deployment.path()).with_history(&moved);
    let orchestrator = RecommendationOrchestrator::load(&paths).unwrap();

    let response = orchestrator.handle(&sample::reference_request());
    assert_eq!(response.products().unwrap(), ["ind_cco_fin_ult1", "ind_recibo_ult1"]);
}

#[tokio::test]
async fn test_async_validation_error() {
    let deployment = common::create_deployment();
    let paths = ArtifactPaths::from_base_dir(deployment.path());
    let orchestrator = RecommendationOrchestrator::load_or_degraded(&paths);

    let request = json!({ "model_params": sample::reference_record() });
    let response = orchestrator.handle_async(request.clone()).await;
    assert_eq!(response, PredictionResponse::Error(ErrorResponse::invalid_parameters(&request)));
}
