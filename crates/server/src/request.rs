//! Request validation and response shapes.
//!
//! Wire format:
//! - request: `{"user_id": <any>, "model_params": {...}}`
//! - success: `{"user_id": <echoed>, "products": [...]}`
//! - invalid request: `{"Error": "Problem with parameters", "par": <request>}`
//! - any other failure: `{"Error": "Problem with request"}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const USER_ID_KEY: &str = "user_id";
pub const MODEL_PARAMS_KEY: &str = "model_params";

const PARAMETERS_PROBLEM: &str = "Problem with parameters";
const REQUEST_PROBLEM: &str = "Problem with request";

/// A request that passed validation, borrowing from the raw request
#[derive(Debug, Clone, Copy)]
pub struct ValidRequest<'a> {
    pub user_id: &'a Value,
    pub model_params: &'a Value,
}

/// Checks that a request carries both required keys.
///
/// Only presence is checked; the content of `model_params` is interpreted
/// by the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl RequestValidator {
    pub fn new() -> Self {
        Self
    }

    /// `true` iff both required keys are present
    pub fn is_valid(&self, request: &Value) -> bool {
        self.validate(request).is_ok()
    }

    /// Returns the valid view of the request, or the list of missing keys.
    pub fn validate<'a>(&self, request: &'a Value) -> Result<ValidRequest<'a>, Vec<&'static str>> {
        let Some(object) = request.as_object() else {
            return Err(vec![USER_ID_KEY, MODEL_PARAMS_KEY]);
        };

        match (object.get(USER_ID_KEY), object.get(MODEL_PARAMS_KEY)) {
            (Some(user_id), Some(model_params)) => Ok(ValidRequest {
                user_id,
                model_params,
            }),
            (user_id, model_params) => {
                let mut missing = Vec::new();
                if user_id.is_none() {
                    missing.push(USER_ID_KEY);
                }
                if model_params.is_none() {
                    missing.push(MODEL_PARAMS_KEY);
                }
                Err(missing)
            }
        }
    }
}

/// Successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub user_id: Value,
    pub products: Vec<String>,
}

/// Structured error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: String,
    /// The offending request, echoed for validation errors only
    #[serde(rename = "par", default, skip_serializing_if = "Option::is_none")]
    pub par: Option<Value>,
}

impl ErrorResponse {
    pub fn invalid_parameters(request: &Value) -> Self {
        Self {
            error: PARAMETERS_PROBLEM.to_string(),
            par: Some(request.clone()),
        }
    }

    pub fn generic() -> Self {
        Self {
            error: REQUEST_PROBLEM.to_string(),
            par: None,
        }
    }
}

/// Everything `handle` can answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Success(PredictionResult),
    Error(ErrorResponse),
}

impl PredictionResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionResponse::Success(_))
    }

    pub fn products(&self) -> Option<&[String]> {
        match self {
            PredictionResponse::Success(result) => Some(&result.products),
            PredictionResponse::Error(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Null)
    }
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        PredictionResponse::Success(result)
    }
}

impl From<ErrorResponse> for PredictionResponse {
    fn from(error: ErrorResponse) -> Self {
        PredictionResponse::Error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let request = json!({ "user_id": 7, "model_params": { "age": 36 } });
        let valid = RequestValidator::new().validate(&request).unwrap();
        assert_eq!(valid.user_id, &json!(7));
        assert_eq!(valid.model_params["age"], json!(36));
    }

    #[test]
    fn test_missing_keys() {
        let validator = RequestValidator::new();
        assert_eq!(
            validator.validate(&json!({ "user_id": 7 })).unwrap_err(),
            vec![MODEL_PARAMS_KEY]
        );
        assert_eq!(
            validator.validate(&json!({ "model_params": {} })).unwrap_err(),
            vec![USER_ID_KEY]
        );
        assert_eq!(validator.validate(&json!([1, 2])).unwrap_err().len(), 2);
        assert!(!validator.is_valid(&json!({})));
        assert!(validator.is_valid(&json!({ "user_id": 1, "model_params": {} })));
    }

    #[test]
    fn test_null_values_count_as_present() {
        let request = json!({ "user_id": null, "model_params": null });
        assert!(RequestValidator::new().validate(&request).is_ok());
    }

    #[test]
    fn test_response_wire_format() {
        let success: PredictionResponse = PredictionResult {
            user_id: json!(1375586),
            products: vec!["ind_cco_fin_ult1".to_string()],
        }
        .into();
        assert_eq!(
            success.to_json(),
            json!({ "user_id": 1375586, "products": ["ind_cco_fin_ult1"] })
        );

        let request = json!({ "user_id": 1 });
        let invalid: PredictionResponse = ErrorResponse::invalid_parameters(&request).into();
        assert_eq!(
            invalid.to_json(),
            json!({ "Error": "Problem with parameters", "par": { "user_id": 1 } })
        );

        let generic: PredictionResponse = ErrorResponse::generic().into();
        assert_eq!(generic.to_json(), json!({ "Error": "Problem with request" }));
        assert!(!generic.is_success());
    }

    #[test]
    fn test_response_round_trip() {
        let body = json!({ "Error": "Problem with request" });
        let parsed: PredictionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed, PredictionResponse::Error(ErrorResponse::generic()));
    }
}
