//! The feature contract shared with the trained artifacts.
//!
//! The order of [`MODEL_FEATURES`] is part of the model artifact: the
//! classifier was trained on columns in exactly this order, so renaming or
//! reordering requires retraining.

/// Categorical features, in encoding order.
pub const CATEGORICAL_FEATURES: [&str; 11] = [
    "sexo",
    "ind_nuevo",
    "indrel",
    "tiprel_1mes",
    "indext",
    "canal_entrada",
    "cod_prov",
    "nomprov",
    "ind_actividad_cliente",
    "segmento",
    "product_name",
];

/// Columns passed to the classifier, in order.
pub const MODEL_FEATURES: [&str; 16] = [
    "sexo",
    "age",
    "ind_nuevo",
    "antiguedad",
    "indrel",
    "tiprel_1mes",
    "indext",
    "canal_entrada",
    "cod_prov",
    "nomprov",
    "ind_actividad_cliente",
    "renta",
    "segmento",
    "product_name",
    "period_prem",
    "cumsum_id_product",
];

/// Position of a feature within [`MODEL_FEATURES`]
pub fn feature_index(name: &str) -> Option<usize> {
    MODEL_FEATURES.iter().position(|feature| *feature == name)
}

/// One candidate's model inputs, aligned with [`MODEL_FEATURES`].
///
/// Values may still be missing here; [`FeatureVector::fill_missing`] produces
/// the dense row the classifier consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [Option<f64>; MODEL_FEATURES.len()],
}

impl FeatureVector {
    /// Build a vector by asking for each feature by name, in model order.
    pub fn from_named(mut value_of: impl FnMut(&str) -> Option<f64>) -> Self {
        let mut values = [None; MODEL_FEATURES.len()];
        for (slot, name) in values.iter_mut().zip(MODEL_FEATURES) {
            // NaN is treated as missing
            *slot = value_of(name).filter(|value| !value.is_nan());
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|idx| self.values[idx])
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Dense row with every missing value replaced by `default`
    pub fn fill_missing(&self, default: f64) -> Vec<f64> {
        self.values
            .iter()
            .map(|value| value.unwrap_or(default))
            .collect()
    }
}
