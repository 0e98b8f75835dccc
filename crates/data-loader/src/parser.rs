//! Parser for the engagement history file and the shared field formats.
//!
//! The history is read with polars, either as a CSV file with a header row or
//! as a parquet file (picked by extension). Only four columns matter for the
//! join; any other column is ignored:
//! - ncodpers: customer id
//! - fecha_dato: reference date
//! - product_name: catalog product id
//! - cumsum_id_product: cumulative engagement count

use crate::error::{DataLoadError, Result};
use crate::types::{CustomerId, EngagementRecord};
use chrono::NaiveDate;
use polars::prelude::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::debug;

pub const CUSTOMER_COLUMN: &str = "ncodpers";
pub const DATE_COLUMN: &str = "fecha_dato";
pub const PRODUCT_COLUMN: &str = "product_name";
pub const COUNT_COLUMN: &str = "cumsum_id_product";

const JOIN_COLUMNS: [&str; 4] = [CUSTOMER_COLUMN, DATE_COLUMN, PRODUCT_COLUMN, COUNT_COLUMN];

/// Date layouts tried in order, after any time component is cut off
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%Y.%m.%d"];

/// Parse a calendar date.
///
/// Accepts year-first dates (`YYYY-MM-DD`, `YYYY/MM/DD`, `YYYYMMDD`,
/// `YYYY.MM.DD`), optionally followed by a time component separated by a
/// space or `T`. Anything else yields `None`.
///
/// Example: "2016-05-28" -> Some(2016-05-28)
///          "2016/05/28 00:00:00" -> Some(2016-05-28)
///          "NA" -> None
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split([' ', 'T']).next()?;
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Parse a customer id, accepting integral floats such as `1375586.0`.
pub fn parse_customer_id(raw: &str) -> Option<CustomerId> {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<CustomerId>() {
        return Some(id);
    }
    let value = trimmed.parse::<f64>().ok()?;
    integral_customer_id(value)
}

/// Convert a float to a customer id when it carries no fractional part.
pub fn integral_customer_id(value: f64) -> Option<CustomerId> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as CustomerId)
    } else {
        None
    }
}

/// On-disk layout of the history file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    Csv,
    Parquet,
}

impl HistoryFormat {
    /// `.parquet` files are columnar; anything else is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => HistoryFormat::Parquet,
            _ => HistoryFormat::Csv,
        }
    }

    /// Line number of the first data row (the CSV header is line 1)
    fn first_line(self) -> usize {
        match self {
            HistoryFormat::Csv => 2,
            HistoryFormat::Parquet => 1,
        }
    }
}

/// One row of the join columns, as text
type RawRow<'a> = (
    usize,
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
);

fn scan_history(path: &Path, format: HistoryFormat) -> Result<LazyFrame> {
    let frame = match format {
        // Every CSV column stays text; typing happens per field below.
        HistoryFormat::Csv => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?,
        HistoryFormat::Parquet => LazyFrame::scan_parquet(path, Default::default())?,
    };
    Ok(frame)
}

/// Select the join columns as text, failing on the first absent one.
fn select_join_columns(file: &str, mut frame: LazyFrame) -> Result<DataFrame> {
    let schema = frame.collect_schema()?;
    if let Some(missing) = JOIN_COLUMNS.into_iter().find(|name| !schema.contains(name)) {
        return Err(DataLoadError::MissingColumn {
            file: file.to_string(),
            column: missing.to_string(),
        });
    }

    let selected = frame
        .select(JOIN_COLUMNS.map(|name| col(name).cast(DataType::String)))
        .collect()?;
    Ok(selected)
}

/// Parse one row. Rows without a count are skipped (`Ok(None)`), which the
/// join treats exactly like an absent row, and so are fully empty rows.
fn parse_record(file: &str, row: RawRow<'_>) -> Result<Option<EngagementRecord>> {
    let (line, customer, date, product, count) = row;
    fn present(field: Option<&str>) -> Option<&str> {
        field.map(str::trim).filter(|value| !value.is_empty())
    }
    let (customer, date, product, count) =
        (present(customer), present(date), present(product), present(count));

    if customer.is_none() && date.is_none() && product.is_none() && count.is_none() {
        return Ok(None);
    }

    let parse_error = |reason: String| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason,
    };

    let customer_id = customer
        .and_then(parse_customer_id)
        .ok_or_else(|| parse_error(format!("Invalid ncodpers: {}", customer.unwrap_or(""))))?;

    let reference_date = date
        .and_then(parse_date)
        .ok_or_else(|| parse_error(format!("Invalid fecha_dato: {}", date.unwrap_or(""))))?;

    let product_name = product.ok_or_else(|| parse_error("Missing product_name".to_string()))?;

    let Some(raw_count) = count else {
        return Ok(None);
    };
    if raw_count.eq_ignore_ascii_case("NA") || raw_count.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let cumulative_count = raw_count
        .parse::<f64>()
        .map_err(|e| parse_error(format!("Invalid cumsum_id_product: {}", e)))?;

    Ok(Some(EngagementRecord {
        customer_id,
        reference_date,
        product_name: product_name.to_string(),
        cumulative_count,
    }))
}

/// Parse the history file into records, in file order.
///
/// Rows are parsed in parallel; the first malformed row aborts the load.
pub fn parse_history(path: &Path) -> Result<Vec<EngagementRecord>> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if !path.is_file() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let format = HistoryFormat::from_path(path);
    let frame = select_join_columns(&file, scan_history(path, format)?)?;

    let customers = frame.column(CUSTOMER_COLUMN)?.str()?;
    let dates = frame.column(DATE_COLUMN)?.str()?;
    let products = frame.column(PRODUCT_COLUMN)?.str()?;
    let counts = frame.column(COUNT_COLUMN)?.str()?;

    let rows: Vec<RawRow<'_>> = customers
        .iter()
        .zip(dates.iter())
        .zip(products.iter())
        .zip(counts.iter())
        .enumerate()
        .map(|(idx, (((customer, date), product), count))| {
            (idx + format.first_line(), customer, date, product, count)
        })
        .collect();

    let parsed: Vec<Option<EngagementRecord>> = rows
        .into_par_iter()
        .map(|row| parse_record(&file, row))
        .collect::<Result<_>>()?;

    let total = parsed.len();
    let records: Vec<EngagementRecord> = parsed.into_iter().flatten().collect();
    if records.len() < total {
        debug!(
            "Skipped {} history rows without a cumulative count in {}",
            total - records.len(),
            file
        );
    }

    Ok(records)
}
