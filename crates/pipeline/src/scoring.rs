//! Scoring of encoded rows with the trained classifier.

use crate::encoding::EncodedRow;
use anyhow::Result;
use ml_model::{Classifier, ModelError};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Value used for inputs that are still missing at scoring time
pub const MISSING_FILL: f64 = 0.0;

/// A candidate product with its acquisition probability.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub product_name_first: String,
    pub probability: f64,
}

/// Applies the classifier to every encoded row.
///
/// Read-only over the shared model; safe to use from many threads.
#[derive(Clone)]
pub struct Scorer {
    classifier: Arc<dyn Classifier>,
}

impl Scorer {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Score rows in order. A probability outside `[0, 1]` (or NaN) fails the
    /// whole batch.
    #[instrument(skip_all, fields(rows = rows.len(), classifier = self.classifier.name()))]
    pub fn score(&self, rows: Vec<EncodedRow>) -> Result<Vec<ScoredRow>> {
        let scored = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| -> Result<ScoredRow> {
                let dense = row.features.fill_missing(MISSING_FILL);
                let probability = self.classifier.predict_proba(&dense)?;
                if !(0.0..=1.0).contains(&probability) {
                    return Err(ModelError::InvalidScore {
                        row: idx,
                        score: probability,
                    }
                    .into());
                }

                Ok(ScoredRow {
                    product_name_first: row.product_name_first,
                    probability,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Scored {} rows", scored.len());
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ml_model::FeatureVector;
    use std::collections::BTreeMap;

    /// Returns a fixed probability for every row.
    struct ConstantClassifier(f64);

    impl Classifier for ConstantClassifier {
        fn name(&self) -> &str {
            "ConstantClassifier"
        }

        fn predict_proba(&self, _row: &[f64]) -> ml_model::Result<f64> {
            Ok(self.0)
        }
    }

    /// Echoes the `cumsum_id_product` input, which is last in the row.
    struct EchoLastClassifier;

    impl Classifier for EchoLastClassifier {
        fn name(&self) -> &str {
            "EchoLastClassifier"
        }

        fn predict_proba(&self, row: &[f64]) -> ml_model::Result<f64> {
            Ok(row.last().copied().unwrap_or_default())
        }
    }

    fn row(product: &str, cumulative_count: Option<f64>) -> EncodedRow {
        EncodedRow {
            features: FeatureVector::from_named(|name| match name {
                "cumsum_id_product" => cumulative_count,
                _ => None,
            }),
            originals: BTreeMap::new(),
            product_name_first: product.to_string(),
        }
    }

    #[test]
    fn test_scores_in_order() {
        let scorer = Scorer::new(Arc::new(EchoLastClassifier));
        let scored = scorer
            .score(vec![row("a", Some(0.25)), row("b", Some(0.75))])
            .unwrap();

        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0], ScoredRow { product_name_first: "a".into(), probability: 0.25 });
        assert_eq!(scored[1], ScoredRow { product_name_first: "b".into(), probability: 0.75 });
    }

    #[test]
    fn test_missing_inputs_are_filled_with_zero() {
        let scorer = Scorer::new(Arc::new(EchoLastClassifier));
        let scored = scorer.score(vec![row("a", None)]).unwrap();
        assert_eq!(scored[0].probability, 0.0);
    }

    #[test]
    fn test_out_of_range_score_is_an_error() {
        let scorer = Scorer::new(Arc::new(ConstantClassifier(1.5)));
        let err = scorer.score(vec![row("a", None)]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ModelError>(),
            Some(ModelError::InvalidScore { row: 0, .. })
        ));
    }

    #[test]
    fn test_nan_score_is_an_error() {
        let scorer = Scorer::new(Arc::new(ConstantClassifier(f64::NAN)));
        assert!(scorer.score(vec![row("a", None)]).is_err());
    }

    #[test]
    fn test_empty_batch() {
        let scorer = Scorer::new(Arc::new(ConstantClassifier(0.9)));
        assert!(scorer.score(Vec::new()).unwrap().is_empty());
        assert_eq!(scorer.classifier_name(), "ConstantClassifier");
    }
}
