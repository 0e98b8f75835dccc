//! Type normalization for categorical attributes.
//!
//! The encoders were trained on columns that were first coerced to integers
//! and, when that was impossible, to strings. The coercion is decided per
//! column: a single value that is not an integer moves the whole column to the
//! string branch.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Code used for a missing value in an integer column
pub const MISSING_CODE: i64 = -99;

/// Token used for a missing value in a string column
pub const MISSING_LABEL: &str = "non_type";

/// A categorical value after type normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryValue {
    /// Integer category (missing is `-99`)
    Code(i64),
    /// Text category (missing is `"non_type"`)
    Label(String),
}

impl CategoryValue {
    /// Canonical text used as the encoder table key
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            CategoryValue::Code(code) => Cow::Owned(code.to_string()),
            CategoryValue::Label(label) => Cow::Borrowed(label),
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            CategoryValue::Code(code) => *code == MISSING_CODE,
            CategoryValue::Label(label) => label == MISSING_LABEL,
        }
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Integer coercion of a single raw value; `None` means the column cannot be
/// an integer column.
pub fn coerce_code(value: &Value) -> Option<i64> {
    match value {
        Value::Null => Some(MISSING_CODE),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text rendering of a single raw value for the string branch.
pub fn render_label(value: &Value) -> String {
    match value {
        Value::Null => MISSING_LABEL.to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(int), _) => int.to_string(),
            (None, Some(float)) => render_float(float),
            (None, None) => number.to_string(),
        },
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Floats keep a trailing `.0` when integral, so `29.0` stays distinct from `29`.
fn render_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Normalize one column of raw values.
///
/// Integer branch when every value coerces to an integer, string branch
/// otherwise. The output has the same length and order as the input.
pub fn normalize_column(values: &[Value]) -> Vec<CategoryValue> {
    let codes: Option<Vec<i64>> = values.iter().map(coerce_code).collect();
    match codes {
        Some(codes) => codes.into_iter().map(CategoryValue::Code).collect(),
        None => values
            .iter()
            .map(|value| CategoryValue::Label(render_label(value)))
            .collect(),
    }
}
