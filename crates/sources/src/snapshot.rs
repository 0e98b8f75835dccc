//! Correction of raw customer attributes into a typed snapshot.
//!
//! The raw attributes come straight from the request and share the quirks of
//! the monthly extracts the model was trained on: numbers padded with
//! whitespace, "NA" markers, a corrupt tenure sentinel and a relation code
//! that mixes digits with the letter "P". Correction never fails; values it
//! cannot interpret become missing and are handled by later fallbacks.

use chrono::NaiveDate;
use data_loader::{parse_customer_id, parse_date, CustomerId};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::fields::*;
use crate::types::CustomerSnapshot;

/// Turns raw request attributes into a [`CustomerSnapshot`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotCorrector;

impl SnapshotCorrector {
    pub fn new() -> Self {
        Self
    }

    /// Correct one raw attribute map.
    ///
    /// Steps:
    /// 1. Coerce age, tenure and income to floats ("NA" and junk become missing)
    /// 2. Drop the tenure sentinel
    /// 3. Parse the three date fields
    /// 4. Promote the "P" relation indicator to 99, then drop it with the
    ///    other low-information attributes
    /// 5. Keep the raw categorical attributes for the encoder
    #[instrument(skip_all)]
    pub fn correct(&self, raw: &Map<String, Value>) -> CustomerSnapshot {
        let field = |name: &str| raw.get(name).unwrap_or(&Value::Null);

        let tenure_months =
            coerce_numeric(field(TENURE)).filter(|tenure| *tenure != TENURE_SENTINEL);

        let relation = relation_indicator(field(RELATION_INDICATOR));
        debug!("Relation indicator {:?} dropped after promotion", relation);

        let dropped: Vec<&str> = DROPPED_ATTRIBUTES
            .iter()
            .copied()
            .filter(|name| raw.contains_key(*name))
            .collect();
        if !dropped.is_empty() {
            debug!("Dropped low-information attributes: {:?}", dropped);
        }

        let categorical = SNAPSHOT_CATEGORICALS
            .iter()
            .filter_map(|name| raw.get(*name).map(|value| (name.to_string(), value.clone())))
            .collect();

        CustomerSnapshot {
            customer_id: coerce_customer_id(field(CUSTOMER_ID)),
            reference_date: coerce_date(field(REFERENCE_DATE)),
            contract_start: coerce_date(field(CONTRACT_START)),
            contract_end: coerce_date(field(CONTRACT_END)),
            age: coerce_numeric(field(AGE)),
            tenure_months,
            income: coerce_numeric(field(INCOME)),
            categorical,
        }
    }
}

/// Float coercion: strings are trimmed, "NA" and unparseable text become
/// missing, booleans become 0/1.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed == NA_TOKEN {
                return None;
            }
            match trimmed.parse::<f64>() {
                Ok(parsed) if !parsed.is_nan() => Some(parsed),
                _ => {
                    debug!("Unparseable numeric value {:?} treated as missing", text);
                    None
                }
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// The relation indicator with the literal "P" -> 99 promotion applied.
pub fn relation_indicator(value: &Value) -> Option<f64> {
    match value {
        Value::String(code) if code == "P" => Some(RELATION_POTENTIAL_CODE),
        other => coerce_numeric(other),
    }
}

fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => parse_date(text),
        _ => None,
    }
}

fn coerce_customer_id(value: &Value) -> Option<CustomerId> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(data_loader::parser::integral_customer_id)),
        Value::String(text) => parse_customer_id(text),
        _ => None,
    }
}
