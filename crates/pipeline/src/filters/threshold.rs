//! Filter that turns probabilities into recommendations.
//!
//! A product is recommended when its acquisition probability is strictly
//! above the threshold; a probability equal to the threshold is rejected.

use crate::scoring::ScoredRow;
use crate::traits::Filter;
use anyhow::Result;
use tracing::debug;

/// Default decision threshold
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Keeps rows whose probability is strictly greater than the threshold.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdFilter {
    threshold: f64,
}

impl ThresholdFilter {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Configure the decision threshold (default: 0.5)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Product labels of the kept rows, in input order.
    pub fn recommend(&self, rows: Vec<ScoredRow>) -> Result<Vec<String>> {
        Ok(self
            .apply(rows)?
            .into_iter()
            .map(|row| row.product_name_first)
            .collect())
    }
}

impl Default for ThresholdFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for ThresholdFilter {
    fn name(&self) -> &str {
        "ThresholdFilter"
    }

    fn apply(&self, rows: Vec<ScoredRow>) -> Result<Vec<ScoredRow>> {
        let total = rows.len();
        let kept: Vec<ScoredRow> = rows
            .into_iter()
            .filter(|row| row.probability > self.threshold)
            .collect();

        debug!("{} kept {}/{} rows", self.name(), kept.len(), total);
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(product: &str, probability: f64) -> ScoredRow {
        ScoredRow {
            product_name_first: product.to_string(),
            probability,
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let rows = vec![
            scored("ind_cco_fin_ult1", 0.5),
            scored("ind_recibo_ult1", 0.5000001),
            scored("ind_ecue_fin_ult1", 0.49),
        ];

        let kept = ThresholdFilter::new().recommend(rows).unwrap();
        assert_eq!(kept, vec!["ind_recibo_ult1".to_string()]);
    }

    #[test]
    fn test_keeps_input_order() {
        let rows = vec![
            scored("a", 0.6),
            scored("b", 0.95),
            scored("c", 0.1),
            scored("d", 0.7),
        ];

        let kept = ThresholdFilter::new().recommend(rows).unwrap();
        assert_eq!(kept, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let kept = ThresholdFilter::new()
            .recommend(vec![scored("a", 0.1), scored("b", 0.2)])
            .unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let filter = ThresholdFilter::new().with_threshold(0.8);
        assert_eq!(filter.threshold(), 0.8);

        let kept = filter.apply(vec![scored("a", 0.6), scored("b", 0.9)]).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].product_name_first, "b");
    }
}
