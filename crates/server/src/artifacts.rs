//! The trained artifacts a running service depends on.

use crate::config::ArtifactPaths;
use crate::error::Result;
use data_loader::{EngagementLookup, HistoryIndex};
use ml_model::{Classifier, EncoderSet, LogisticRegression};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Read-only artifacts shared by every request.
///
/// The history is optional: without it the service still answers, with every
/// cumulative engagement count at 0.
#[derive(Clone)]
pub struct Artifacts {
    pub encoders: Arc<EncoderSet>,
    pub classifier: Arc<dyn Classifier>,
    pub history: Option<Arc<dyn EngagementLookup>>,
}

impl Artifacts {
    pub fn new(
        encoders: Arc<EncoderSet>,
        classifier: Arc<dyn Classifier>,
        history: Option<Arc<dyn EngagementLookup>>,
    ) -> Self {
        Self {
            encoders,
            classifier,
            history,
        }
    }

    /// Load the three artifacts in parallel.
    ///
    /// Encoder or model failures are fatal; a history failure only downgrades
    /// the history join.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let start = Instant::now();
        info!("Loading artifacts: {:?}", paths);

        let (encoders, (classifier, history)) = rayon::join(
            || EncoderSet::load_from_file(&paths.encoders),
            || {
                rayon::join(
                    || LogisticRegression::load_from_file(&paths.model),
                    || HistoryIndex::load_from_file(&paths.history),
                )
            },
        );

        let history: Option<Arc<dyn EngagementLookup>> = match history {
            Ok(index) => Some(Arc::new(index)),
            Err(err) => {
                warn!(
                    "Engagement history unavailable ({}); cumulative counts will be 0",
                    err
                );
                None
            }
        };

        let artifacts = Self::new(Arc::new(encoders?), Arc::new(classifier?), history);
        info!(
            "Artifacts loaded in {:.2?} (history: {})",
            start.elapsed(),
            if artifacts.has_history() { "available" } else { "unavailable" }
        );
        Ok(artifacts)
    }

    pub fn has_history(&self) -> bool {
        self.history.is_some()
    }
}
