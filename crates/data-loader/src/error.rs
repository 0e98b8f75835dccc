//! Error types for the data-loader crate.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while loading the engagement history.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The header row lacks a column the join depends on
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// The history file couldn't be read as a table
    #[error("Failed to read table: {0}")]
    TableError(#[from] PolarsError),

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
