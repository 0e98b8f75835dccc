//! Filter implementations for the selection stage.

pub mod threshold;

// Re-export for convenience
pub use threshold::{ThresholdFilter, DEFAULT_THRESHOLD};
