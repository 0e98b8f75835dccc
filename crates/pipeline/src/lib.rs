//! Scoring pipeline for candidate products.
//!
//! This crate provides the stages that run after candidate expansion:
//! - HistoricalFeatureJoiner attaches engagement history and the premium period
//! - CategoricalEncoder maps categorical attributes to trained codes
//! - Scorer applies the classifier to every row
//! - Filter trait and ThresholdFilter select the recommended products
//!
//! ## Architecture
//! Every stage is an immutable transformation between typed row collections:
//! 1. `CandidateRow` -> `EnrichedRow` (history join)
//! 2. `EnrichedRow` -> `EncodedRow` (categorical encoding)
//! 3. `EncodedRow` -> `ScoredRow` (classification)
//! 4. `ScoredRow` -> product labels (threshold)
//!
//! Row order is preserved through every stage, so recommendations come back
//! in catalog order.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{CategoricalEncoder, HistoricalFeatureJoiner, Scorer, ThresholdFilter};
//!
//! let enriched = HistoricalFeatureJoiner::new(history).join(rows);
//! let encoded = CategoricalEncoder::new(encoders).encode(enriched)?;
//! let scored = Scorer::new(classifier).score(encoded)?;
//! let products = ThresholdFilter::new().recommend(scored)?;
//! ```

pub mod encoding;
pub mod features;
pub mod filters;
pub mod scoring;
pub mod traits;

// Re-export main types
pub use encoding::{first_column, CategoricalEncoder, EncodedRow};
pub use features::{premium_period, EnrichedRow, HistoricalFeatureJoiner, NO_ENGAGEMENT, NO_PERIOD};
pub use filters::ThresholdFilter;
pub use scoring::{ScoredRow, Scorer};
pub use traits::Filter;
