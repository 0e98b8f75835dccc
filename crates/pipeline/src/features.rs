//! Historical feature engineering for candidate rows.
//!
//! Adds the two history-derived features the classifier needs:
//! - `cumsum_id_product`: the customer's cumulative engagement with the
//!   candidate product, joined from the history index
//! - `period_prem`: days since the customer stopped being a primary customer

use chrono::NaiveDate;
use data_loader::EngagementLookup;
use sources::CandidateRow;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// `period_prem` value when the period is missing, non-computable or negative
pub const NO_PERIOD: i64 = -1;

/// `cumsum_id_product` value when the join finds nothing
pub const NO_ENGAGEMENT: f64 = 0.0;

/// A candidate row with its historical features attached.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRow {
    pub candidate: CandidateRow,
    pub cumulative_count: f64,
    pub period_prem: i64,
}

/// Joins historical engagement onto candidate rows.
///
/// The history source is optional: when it could not be loaded every row
/// receives [`NO_ENGAGEMENT`].
#[derive(Clone)]
pub struct HistoricalFeatureJoiner {
    history: Option<Arc<dyn EngagementLookup>>,
}

impl HistoricalFeatureJoiner {
    pub fn new(history: Option<Arc<dyn EngagementLookup>>) -> Self {
        Self { history }
    }

    /// Joiner with no history source (every count is [`NO_ENGAGEMENT`])
    pub fn without_history() -> Self {
        Self { history: None }
    }

    pub fn has_history(&self) -> bool {
        self.history.is_some()
    }

    /// Attach `cumsum_id_product` and `period_prem` to every row, in order.
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub fn join(&self, rows: Vec<CandidateRow>) -> Vec<EnrichedRow> {
        let Some(first) = rows.first() else {
            return Vec::new();
        };

        // All rows of a request share one snapshot, so the join keys and the
        // period are computed once.
        let snapshot = Arc::clone(&first.snapshot);
        let period_prem = premium_period(snapshot.reference_date, snapshot.contract_end);

        let join_key = match (&self.history, snapshot.customer_id, snapshot.reference_date) {
            (None, _, _) => {
                warn!("History source unavailable; cumulative engagement set to 0 for all rows");
                None
            }
            (Some(history), Some(customer_id), Some(reference_date)) => {
                Some((history, customer_id, reference_date))
            }
            (Some(_), customer_id, reference_date) => {
                warn!(
                    ?customer_id,
                    ?reference_date,
                    "Snapshot lacks a join key; cumulative engagement set to 0 for all rows"
                );
                None
            }
        };

        let mut matched = 0usize;
        let enriched: Vec<EnrichedRow> = rows
            .into_iter()
            .map(|candidate| {
                let cumulative_count = join_key
                    .and_then(|(history, customer_id, reference_date)| {
                        history.cumulative_count(
                            customer_id,
                            reference_date,
                            &candidate.product_name,
                        )
                    })
                    .inspect(|_| matched += 1)
                    .unwrap_or(NO_ENGAGEMENT);

                EnrichedRow {
                    candidate,
                    cumulative_count,
                    period_prem,
                }
            })
            .collect();

        debug!(
            "Joined history onto {} rows ({} matched, period_prem = {})",
            enriched.len(),
            matched,
            period_prem
        );
        enriched
    }
}

/// Days from the contract end to the reference date.
///
/// Missing dates give [`NO_PERIOD`]; negative periods are clamped to it.
pub fn premium_period(reference_date: Option<NaiveDate>, contract_end: Option<NaiveDate>) -> i64 {
    match (reference_date, contract_end) {
        (Some(reference), Some(end)) => {
            let days = reference.signed_duration_since(end).num_days();
            if days < 0 { NO_PERIOD } else { days }
        }
        _ => NO_PERIOD,
    }
}
