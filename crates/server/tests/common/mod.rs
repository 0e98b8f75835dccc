//! Shared test utilities and fixture generators

use ml_model::{CATEGORICAL_FEATURES, MODEL_FEATURES};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Encoder artifact where only the product carries signal:
/// `ind_cco_fin_ult1` scores high, `ind_recibo_ult1` needs engagement history.
pub fn encoder_artifact() -> Value {
    let mut tables = Map::new();
    for feature in CATEGORICAL_FEATURES {
        tables.insert(
            feature.to_string(),
            json!({ "categories": { "-99": 0.0 }, "fallback": 0.0 }),
        );
    }
    tables.insert(
        "product_name".to_string(),
        json!({
            "categories": { "ind_cco_fin_ult1": 3.0, "ind_recibo_ult1": -1.0 },
            "fallback": -2.0,
        }),
    );
    Value::Object(tables)
}

/// Logistic regression over the product code and the engagement count
pub fn model_artifact() -> Value {
    let coefficients: Vec<f64> = MODEL_FEATURES
        .iter()
        .map(|feature| match *feature {
            "product_name" => 1.0,
            "cumsum_id_product" => 0.5,
            _ => 0.0,
        })
        .collect();

    json!({
        "feature_names": MODEL_FEATURES,
        "coefficients": coefficients,
        "intercept": 0.0,
    })
}

pub const HISTORY_CSV: &str = "\
ncodpers,fecha_dato,product_name,cumsum_id_product,source
1375586,2016-05-28,ind_recibo_ult1,6,\"extract, May\"
1375586,2016-04-28,ind_cco_fin_ult1,2,extract
1050611,2016-05-28,ind_recibo_ult1,1,extract
";

/// Create a deployment directory with all three artifacts in the standard layout
pub fn create_deployment() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_json(&temp_dir.path().join("models/dict_encoders.json"), &encoder_artifact());
    write_json(&temp_dir.path().join("models/logreg_model.json"), &model_artifact());
    write_file(&temp_dir.path().join("data/df_long_cumsum.csv"), HISTORY_CSV);
    temp_dir
}

pub fn write_json(path: &Path, value: &Value) {
    write_file(path, &serde_json::to_string_pretty(value).unwrap());
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
