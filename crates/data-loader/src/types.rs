//! Core domain types for the engagement history.
//!
//! The history is an append-only dataset with one row per
//! (customer, reference date, product) carrying the cumulative number of
//! engagement events up to that date. It is loaded once and only ever read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Customer identifier (`ncodpers` in the raw data)
pub type CustomerId = i64;

/// Product identifier, e.g. `ind_cco_fin_ult1`
pub type ProductId = String;

// =============================================================================
// Records
// =============================================================================

/// One row of the engagement history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub customer_id: CustomerId,
    pub reference_date: NaiveDate,
    pub product_name: ProductId,
    /// Cumulative engagement count up to `reference_date`
    pub cumulative_count: f64,
}

/// Read-only keyed lookup over cumulative engagement counts.
///
/// Implementations must be safe to share across request threads; the pipeline
/// never mutates them.
pub trait EngagementLookup: Send + Sync {
    /// Returns the cumulative count for the key, or `None` when the history
    /// holds no matching row.
    fn cumulative_count(
        &self,
        customer_id: CustomerId,
        reference_date: NaiveDate,
        product_name: &str,
    ) -> Option<f64>;
}

// =============================================================================
// HistoryIndex - In-memory engagement store
// =============================================================================

/// Engagement history indexed for O(1) lookups on the join key.
#[derive(Debug, Default)]
pub struct HistoryIndex {
    /// (customer, date) -> product -> cumulative count
    pub(crate) counts: HashMap<(CustomerId, NaiveDate), HashMap<ProductId, f64>>,

    /// Every reference date recorded for a customer (sorted)
    pub(crate) customer_dates: HashMap<CustomerId, BTreeSet<NaiveDate>>,

    /// Rows that replaced an earlier row with the same key
    pub(crate) duplicate_keys: usize,
}

impl HistoryIndex {
    /// Creates a new, empty HistoryIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; a later record with the same key replaces the earlier one.
    pub fn insert_record(&mut self, record: EngagementRecord) {
        let products = self
            .counts
            .entry((record.customer_id, record.reference_date))
            .or_default();

        if products
            .insert(record.product_name, record.cumulative_count)
            .is_some()
        {
            self.duplicate_keys += 1;
        }
    }

    /// All product counts recorded for a customer at a reference date
    pub fn get_customer_history(
        &self,
        customer_id: CustomerId,
        reference_date: NaiveDate,
    ) -> Option<&HashMap<ProductId, f64>> {
        self.counts.get(&(customer_id, reference_date))
    }

    /// The most recent reference date recorded for a customer
    pub fn latest_date(&self, customer_id: CustomerId) -> Option<NaiveDate> {
        self.customer_dates
            .get(&customer_id)
            .and_then(|dates| dates.iter().next_back().copied())
    }

    /// Number of distinct keys held by the index
    pub fn len(&self) -> usize {
        self.counts.values().map(|products| products.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of rows that overwrote an earlier row with the same key
    pub fn duplicate_keys(&self) -> usize {
        self.duplicate_keys
    }
}

impl EngagementLookup for HistoryIndex {
    fn cumulative_count(
        &self,
        customer_id: CustomerId,
        reference_date: NaiveDate,
        product_name: &str,
    ) -> Option<f64> {
        self.counts
            .get(&(customer_id, reference_date))
            .and_then(|products| products.get(product_name))
            .copied()
    }
}
