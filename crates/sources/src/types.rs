//! Core types shared by snapshot correction and candidate expansion.

use chrono::NaiveDate;
use data_loader::{CustomerId, ProductId};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::fields::PRODUCT_NAME;

static MISSING: Value = Value::Null;

/// A customer snapshot after type correction.
///
/// Every field except the categorical block is typed; categorical values stay
/// raw because their normalization is decided per column at encoding time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerSnapshot {
    pub customer_id: Option<CustomerId>,
    pub reference_date: Option<NaiveDate>,
    pub contract_start: Option<NaiveDate>,
    pub contract_end: Option<NaiveDate>,
    pub age: Option<f64>,
    pub tenure_months: Option<f64>,
    pub income: Option<f64>,
    /// Raw categorical attributes that were present in the request
    pub categorical: BTreeMap<String, Value>,
}

impl CustomerSnapshot {
    /// Raw value of a categorical attribute; `null` when absent.
    pub fn categorical(&self, name: &str) -> &Value {
        self.categorical.get(name).unwrap_or(&MISSING)
    }
}

/// One (customer snapshot, product) pair awaiting scoring.
///
/// All rows of a request share the same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub snapshot: Arc<CustomerSnapshot>,
    pub product_name: ProductId,
}

impl CandidateRow {
    pub fn new(snapshot: Arc<CustomerSnapshot>, product_name: impl Into<ProductId>) -> Self {
        Self {
            snapshot,
            product_name: product_name.into(),
        }
    }

    /// Raw value of a categorical attribute, including the row's product.
    pub fn categorical_value(&self, name: &str) -> Value {
        if name == PRODUCT_NAME {
            Value::String(self.product_name.clone())
        } else {
            self.snapshot.categorical(name).clone()
        }
    }
}
