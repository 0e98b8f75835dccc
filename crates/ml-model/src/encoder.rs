//! Pretrained per-feature encoder tables.
//!
//! Each categorical feature has a table mapping the canonical text of a
//! normalized category to its trained numeric code, plus the code used for
//! categories the encoder never saw during training.
//!
//! Artifact format (`dict_encoders.json`):
//! ```json
//! {
//!   "sexo": { "categories": { "H": 0.031, "V": 0.047 }, "fallback": 0.039 },
//!   "cod_prov": { "categories": { "29": 0.036, "-99": 0.02 }, "fallback": 0.04 }
//! }
//! ```

use crate::artifact::read_json_artifact;
use crate::category::CategoryValue;
use crate::error::{ModelError, Result};
use crate::features::CATEGORICAL_FEATURES;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Trained mapping for one categorical feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderTable {
    pub categories: HashMap<String, f64>,
    /// Code for unseen categories
    pub fallback: f64,
}

impl EncoderTable {
    pub fn new<K: Into<String>>(
        categories: impl IntoIterator<Item = (K, f64)>,
        fallback: f64,
    ) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|(category, code)| (category.into(), code))
                .collect(),
            fallback,
        }
    }

    /// Encode a category. Total: unseen categories get the fallback code.
    pub fn encode(&self, value: &CategoryValue) -> f64 {
        self.categories
            .get(value.key().as_ref())
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn contains(&self, value: &CategoryValue) -> bool {
        self.categories.contains_key(value.key().as_ref())
    }

    fn validate(&self, feature: &str) -> Result<()> {
        if !self.fallback.is_finite() {
            return Err(ModelError::InvalidModel(format!(
                "encoder '{}' has a non-finite fallback code",
                feature
            )));
        }
        if let Some((category, code)) = self.categories.iter().find(|(_, code)| !code.is_finite()) {
            return Err(ModelError::InvalidModel(format!(
                "encoder '{}' maps '{}' to non-finite code {}",
                feature, category, code
            )));
        }
        Ok(())
    }
}

/// The full set of encoder tables, one per categorical feature.
///
/// Loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct EncoderSet {
    tables: HashMap<String, EncoderTable>,
}

impl EncoderSet {
    /// Build a set, checking that every categorical feature has a valid table.
    pub fn new(tables: HashMap<String, EncoderTable>) -> Result<Self> {
        for feature in CATEGORICAL_FEATURES {
            let table = tables
                .get(feature)
                .ok_or_else(|| ModelError::MissingEncoder(feature.to_string()))?;
            table.validate(feature)?;
        }
        Ok(Self { tables })
    }

    /// Load the encoder artifact from disk.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let tables: HashMap<String, EncoderTable> = read_json_artifact(path)?;
        let set = Self::new(tables)?;
        info!(
            "Loaded {} encoder tables from {}",
            set.tables.len(),
            path.display()
        );
        Ok(set)
    }

    pub fn table(&self, feature: &str) -> Result<&EncoderTable> {
        self.tables
            .get(feature)
            .ok_or_else(|| ModelError::MissingEncoder(feature.to_string()))
    }

    pub fn encode(&self, feature: &str, value: &CategoryValue) -> Result<f64> {
        Ok(self.table(feature)?.encode(value))
    }
}
