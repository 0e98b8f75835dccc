//! HistoryIndex building and indexing logic.
//!
//! Builds the join index from parsed records:
//! - primary index on (customer, date) -> product -> count
//! - secondary index of reference dates per customer
//! - validation of the loaded data

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{info, warn};

impl HistoryIndex {
    /// Load the engagement history from a CSV or parquet file.
    ///
    /// Steps:
    /// 1. Parse all rows (in parallel)
    /// 2. Build the primary index, later rows winning on duplicate keys
    /// 3. Build the per-customer date index
    /// 4. Validate counts
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading engagement history from {:?}", path);

        let records = parser::parse_history(path)?;
        let index = Self::from_records(records);
        index.validate()?;

        if index.duplicate_keys > 0 {
            warn!(
                "Engagement history contains {} duplicate keys; kept the last row for each",
                index.duplicate_keys
            );
        }
        info!("Engagement history loaded: {} keyed counts", index.len());
        Ok(index)
    }

    /// Build an index from in-memory records
    pub fn from_records(records: impl IntoIterator<Item = EngagementRecord>) -> Self {
        let mut index = HistoryIndex::new();
        for record in records {
            index.insert_record(record);
        }
        index.build_secondary_indices();
        index
    }

    /// Rebuild the per-customer date index from the primary index
    pub fn build_secondary_indices(&mut self) {
        self.customer_dates.clear();
        for &(customer_id, reference_date) in self.counts.keys() {
            self.customer_dates
                .entry(customer_id)
                .or_default()
                .insert(reference_date);
        }
    }

    /// Validate data integrity: counts are cumulative, so never negative or NaN.
    pub fn validate(&self) -> Result<()> {
        for (&(customer_id, reference_date), products) in &self.counts {
            for (product, &count) in products {
                if !count.is_finite() || count < 0.0 {
                    return Err(DataLoadError::ValidationError(format!(
                        "Invalid cumulative count {} for customer {} on {} ({})",
                        count, customer_id, reference_date, product
                    )));
                }
            }
        }
        Ok(())
    }
}
