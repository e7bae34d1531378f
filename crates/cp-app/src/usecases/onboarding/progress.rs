//! Onboarding progress tracker.
//!
//! Persists partial wizard answers under the progress key so an interrupted
//! flow can resume. Reads fail open; writes report storage errors so the
//! wizard never advances past what was durably recorded.

use std::sync::Arc;

use cp_core::onboarding::{StepPayload, StepProgress};
use cp_core::ports::{KeyValueStorePort, ONBOARDING_PROGRESS_KEY};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("progress storage failed: {0}")]
    Storage(#[source] anyhow::Error),
    #[error("failed to encode step payload: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct ProgressTracker {
    store: Arc<dyn KeyValueStorePort>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    /// Record `payload` under its step index, replacing any earlier payload
    /// for that step and keeping the others.
    pub fn save_step(&self, payload: &StepPayload) -> Result<StepProgress, ProgressError> {
        let step = payload.step();
        let mut progress = self.load_all();
        progress.insert(step, payload.to_value()?);

        let json = serde_json::to_string(&progress)?;
        self.store
            .set(ONBOARDING_PROGRESS_KEY, &json)
            .map_err(ProgressError::Storage)?;
        debug!(step = step.index(), recorded = progress.len(), "step progress saved");
        Ok(progress)
    }

    /// The persisted mapping; empty when absent, unreadable or malformed.
    pub fn load_all(&self) -> StepProgress {
        let raw = match self.store.get(ONBOARDING_PROGRESS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StepProgress::new(),
            Err(err) => {
                warn!(error = %err, "failed to read step progress, treating as empty");
                return StepProgress::new();
            }
        };

        match serde_json::from_str::<StepProgress>(&raw) {
            Ok(progress) => {
                let (progress, dropped) = progress.sanitized();
                if dropped > 0 {
                    warn!(dropped, "ignored step progress entries with unknown step index");
                }
                progress
            }
            Err(err) => {
                warn!(error = %err, "malformed step progress, treating as empty");
                StepProgress::new()
            }
        }
    }

    pub fn clear(&self) -> Result<(), ProgressError> {
        self.store
            .delete(ONBOARDING_PROGRESS_KEY)
            .map_err(ProgressError::Storage)?;
        debug!("step progress cleared");
        Ok(())
    }
}
