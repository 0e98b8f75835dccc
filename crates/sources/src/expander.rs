//! Candidate expansion: one row per (customer, product) pair.
//!
//! A request carries a single customer snapshot. Expansion is a cross-join of
//! that snapshot with the catalog, so the output always has exactly one row per
//! catalog product, in catalog order.

use crate::catalog::ProductCatalog;
use crate::types::{CandidateRow, CustomerSnapshot};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Cross-joins customer snapshots with the product catalog
#[derive(Debug, Clone)]
pub struct CandidateExpander {
    /// Shared, read-only catalog
    catalog: Arc<ProductCatalog>,
}

impl CandidateExpander {
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Expand one snapshot into a candidate row per catalog product.
    #[instrument(skip_all, fields(customer_id = ?snapshot.customer_id))]
    pub fn expand(&self, snapshot: CustomerSnapshot) -> Vec<CandidateRow> {
        let snapshot = Arc::new(snapshot);
        let rows: Vec<CandidateRow> = self
            .catalog
            .iter()
            .map(|product| CandidateRow::new(Arc::clone(&snapshot), product))
            .collect();

        debug!("Expanded snapshot into {} candidate rows", rows.len());
        rows
    }
}

impl Default for CandidateExpander {
    fn default() -> Self {
        Self::new(Arc::new(ProductCatalog::standard()))
    }
}
