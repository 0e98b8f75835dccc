//! Core traits for the selection stage.
//!
//! This module defines the Filter trait that decides which scored
//! candidates become recommendations.

use crate::scoring::ScoredRow;
use anyhow::Result;

/// Core trait for selecting scored candidates.
///
/// ## Design Note
/// - `Send + Sync` allows one filter to serve concurrent requests
/// - Filters take ownership of the rows and return the kept ones
/// - Kept rows must stay in their input order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of scored rows.
    ///
    /// # Returns
    /// * `Ok(Vec<ScoredRow>)` - The rows that passed, in input order
    /// * `Err` - If filtering fails
    fn apply(&self, rows: Vec<ScoredRow>) -> Result<Vec<ScoredRow>>;
}
