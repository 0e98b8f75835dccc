//! Categorical encoding of enriched candidate rows.
//!
//! Each categorical column is normalized as a whole (integer or string
//! branch), the normalized value is kept as `<feature>_first`, and the
//! feature's trained code replaces it in the model input.

use crate::features::EnrichedRow;
use anyhow::{Context, Result};
use ml_model::{normalize_column, CategoryValue, EncoderSet, FeatureVector, CATEGORICAL_FEATURES};
use sources::fields::PRODUCT_NAME;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Suffix of the columns holding pre-encoding values
pub const FIRST_SUFFIX: &str = "_first";

/// Name of the column retaining the pre-encoding value of `feature`
pub fn first_column(feature: &str) -> String {
    format!("{feature}{FIRST_SUFFIX}")
}

/// A row ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow {
    /// Model inputs in the fixed feature order
    pub features: FeatureVector,
    /// Pre-encoding categorical values, keyed by `<feature>_first`
    pub originals: BTreeMap<String, CategoryValue>,
    /// The product label reported back to the caller
    pub product_name_first: String,
}

impl EncodedRow {
    /// Pre-encoding value of a categorical feature
    pub fn first(&self, feature: &str) -> Option<&CategoryValue> {
        self.originals.get(&first_column(feature))
    }
}

/// Encodes categorical features with the pretrained encoder tables.
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    encoders: Arc<EncoderSet>,
}

impl CategoricalEncoder {
    pub fn new(encoders: Arc<EncoderSet>) -> Self {
        Self { encoders }
    }

    /// Encode every row. Unseen categories take the table's fallback code;
    /// a feature without a table is an error.
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub fn encode(&self, rows: Vec<EnrichedRow>) -> Result<Vec<EncodedRow>> {
        let mut originals: Vec<BTreeMap<String, CategoryValue>> = vec![BTreeMap::new(); rows.len()];
        let mut codes: Vec<BTreeMap<&str, f64>> = vec![BTreeMap::new(); rows.len()];

        for feature in CATEGORICAL_FEATURES {
            let column: Vec<_> = rows
                .iter()
                .map(|row| row.candidate.categorical_value(feature))
                .collect();
            let table = self
                .encoders
                .table(feature)
                .with_context(|| format!("encoding column '{}'", feature))?;

            let (mut unseen, mut missing) = (0usize, 0usize);
            for (idx, value) in normalize_column(&column).into_iter().enumerate() {
                if value.is_missing() {
                    missing += 1;
                }
                if !table.contains(&value) {
                    unseen += 1;
                }
                codes[idx].insert(feature, table.encode(&value));
                originals[idx].insert(first_column(feature), value);
            }
            if missing > 0 {
                debug!("{} missing values in '{}'", missing, feature);
            }
            if unseen > 0 {
                debug!("{} unseen categories in '{}' took the fallback code", unseen, feature);
            }
        }

        let encoded = rows
            .into_iter()
            .zip(originals)
            .zip(codes)
            .map(|((row, originals), codes)| {
                let snapshot = &row.candidate.snapshot;
                let features = FeatureVector::from_named(|name| match name {
                    "age" => snapshot.age,
                    "antiguedad" => snapshot.tenure_months,
                    "renta" => snapshot.income,
                    "period_prem" => Some(row.period_prem as f64),
                    "cumsum_id_product" => Some(row.cumulative_count),
                    categorical => codes.get(categorical).copied(),
                });
                let product_name_first = originals
                    .get(&first_column(PRODUCT_NAME))
                    .map(|value| value.key().into_owned())
                    .unwrap_or_else(|| row.candidate.product_name.clone());

                EncodedRow {
                    features,
                    originals,
                    product_name_first,
                }
            })
            .collect::<Vec<_>>();

        debug!("Encoded {} rows", encoded.len());
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::HistoricalFeatureJoiner;
    use ml_model::EncoderTable;
    use serde_json::json;
    use sources::{CandidateExpander, CustomerSnapshot};
    use std::collections::HashMap;

    fn encoders() -> Arc<EncoderSet> {
        let mut tables: HashMap<String, EncoderTable> = CATEGORICAL_FEATURES
            .iter()
            .map(|feature| (feature.to_string(), EncoderTable::new([("-99", 0.01)], 0.5)))
            .collect();
        tables.insert(
            "sexo".to_string(),
            EncoderTable::new([("H", 0.2), ("V", 0.3), ("non_type", 0.0)], 0.25),
        );
        tables.insert("cod_prov".to_string(), EncoderTable::new([("29", 0.7)], 0.4));
        tables.insert(
            "product_name".to_string(),
            EncoderTable::new([("ind_cco_fin_ult1", 0.9)], 0.05),
        );
        Arc::new(EncoderSet::new(tables).unwrap())
    }

    fn enriched(categorical: serde_json::Value) -> Vec<EnrichedRow> {
        let mut snapshot = CustomerSnapshot {
            age: Some(36.0),
            income: Some(87218.1),
            ..Default::default()
        };
        if let serde_json::Value::Object(map) = categorical {
            snapshot.categorical.extend(map);
        }
        let rows = CandidateExpander::default().expand(snapshot);
        HistoricalFeatureJoiner::without_history().join(rows)
    }

    #[test]
    fn test_encoding_is_total() {
        let rows = enriched(json!({
            "sexo": "H",
            "cod_prov": 29.0,
            "segmento": "02 - PARTICULARES",
        }));
        let encoded = CategoricalEncoder::new(encoders()).encode(rows).unwrap();

        assert_eq!(encoded.len(), 13);
        for row in &encoded {
            let guaranteed = CATEGORICAL_FEATURES
                .iter()
                .chain(["period_prem", "cumsum_id_product"].iter());
            for feature in guaranteed {
                assert!(row.features.get(feature).is_some(), "{} is missing", feature);
            }
            assert_eq!(row.features.get("sexo"), Some(0.2));
            assert_eq!(row.features.get("cod_prov"), Some(0.7));
            // unseen label takes the fallback
            assert_eq!(row.features.get("segmento"), Some(0.5));
            assert_eq!(row.features.get("age"), Some(36.0));
            assert_eq!(row.features.get("antiguedad"), None);
            assert_eq!(row.features.get("period_prem"), Some(-1.0));
            assert_eq!(row.features.get("cumsum_id_product"), Some(0.0));
        }
    }

    #[test]
    fn test_first_columns_keep_pre_encoding_values() {
        let rows = enriched(json!({ "sexo": "H", "cod_prov": 29.0 }));
        let encoded = CategoricalEncoder::new(encoders()).encode(rows).unwrap();

        let row = &encoded[4];
        assert_eq!(row.product_name_first, "ind_cco_fin_ult1");
        assert_eq!(row.features.get("product_name"), Some(0.9));
        assert_eq!(row.first("sexo"), Some(&CategoryValue::Label("H".to_string())));
        assert_eq!(row.first("cod_prov"), Some(&CategoryValue::Code(29)));
        // absent attributes are missing in the integer branch
        assert_eq!(row.first("indrel"), Some(&CategoryValue::Code(-99)));
        assert_eq!(row.features.get("indrel"), Some(0.01));
        assert_eq!(row.originals.len(), CATEGORICAL_FEATURES.len());
        assert!(row.originals.contains_key("product_name_first"));
    }

    #[test]
    fn test_product_labels_follow_catalog_order() {
        let encoded = CategoricalEncoder::new(encoders())
            .encode(enriched(json!({})))
            .unwrap();
        let labels: Vec<&str> = encoded.iter().map(|row| row.product_name_first.as_str()).collect();
        assert_eq!(labels, sources::STANDARD_PRODUCTS.to_vec());
    }

    #[test]
    fn test_first_column_name() {
        assert_eq!(first_column("sexo"), "sexo_first");
    }
}
