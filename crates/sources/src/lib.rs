//! # Sources Crate
//!
//! Turns one raw customer record into the candidate rows the scoring pipeline
//! works on.
//!
//! ## Components
//!
//! ### Snapshot Correction
//! Type-corrects the raw attributes of a request:
//! - numeric fields are trimmed and cast, "NA" becomes missing
//! - the corrupt tenure sentinel is discarded
//! - dates are parsed leniently
//! - low-information attributes are dropped
//!
//! ### Candidate Expansion
//! Cross-joins the corrected snapshot with the product catalog, producing one
//! row per product in catalog order.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CandidateExpander, SnapshotCorrector};
//!
//! let snapshot = SnapshotCorrector::new().correct(raw_attributes);
//! let rows = CandidateExpander::default().expand(snapshot);
//! assert_eq!(rows.len(), 13);
//! ```

// Public modules
pub mod catalog;
pub mod expander;
pub mod fields;
pub mod sample;
pub mod snapshot;
pub mod types;

// Re-export commonly used types
pub use catalog::{ProductCatalog, STANDARD_PRODUCTS};
pub use expander::CandidateExpander;
pub use snapshot::SnapshotCorrector;
pub use types::{CandidateRow, CustomerSnapshot};
