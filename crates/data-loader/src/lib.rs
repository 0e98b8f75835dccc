//! # Data Loader Crate
//!
//! This crate loads and indexes the customer engagement history that the
//! recommendation pipeline left-joins onto every candidate row.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (EngagementRecord, HistoryIndex, EngagementLookup)
//! - **parser**: Read the history (CSV or parquet) and the shared date/id formats
//! - **index**: Build and validate the lookup index
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{EngagementLookup, HistoryIndex};
//! use std::path::Path;
//!
//! let history = HistoryIndex::load_from_file(Path::new("data/df_long_cumsum.csv"))?;
//! let count = history.cumulative_count(1375586, date, "ind_cco_fin_ult1").unwrap_or(0.0);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{parse_customer_id, parse_date, HistoryFormat};
pub use types::{
    // Type aliases
    CustomerId,
    ProductId,
    // Core types
    EngagementLookup,
    EngagementRecord,
    HistoryIndex,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_history_index_creation() {
        let index = HistoryIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.duplicate_keys(), 0);
    }

    #[test]
    fn test_insert_record() {
        let mut index = HistoryIndex::new();
        let date = NaiveDate::from_ymd_opt(2016, 5, 28).unwrap();

        index.insert_record(EngagementRecord {
            customer_id: 1375586,
            reference_date: date,
            product_name: "ind_cco_fin_ult1".to_string(),
            cumulative_count: 12.0,
        });

        let history = index.get_customer_history(1375586, date).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history["ind_cco_fin_ult1"], 12.0);
    }

    #[test]
    fn test_empty_queries() {
        let index = HistoryIndex::new();
        let date = NaiveDate::from_ymd_opt(2016, 5, 28).unwrap();

        assert!(index.get_customer_history(999, date).is_none());
        assert!(index.cumulative_count(999, date, "ind_cco_fin_ult1").is_none());
        assert!(index.latest_date(999).is_none());
    }
}
