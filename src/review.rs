//! Recording review workflow.
//!
//! Standard flow: `pending` -> `transcribed` -> `approved` | `rejected`,
//! with the two review outcomes terminal. `set_status` deliberately does
//! not block non-standard transitions (an admin may re-approve a rejected
//! recording); it logs them at warn level instead so overrides stay
//! visible to operators.

use crate::error::{FieldcastError, Result};
use crate::model::{Recording, RecordingStatus};
use crate::store::RecordingStore;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Review workflow over the recording store.
pub struct ReviewWorkflow {
    recordings: Arc<dyn RecordingStore>,
}

impl ReviewWorkflow {
    pub fn new(recordings: Arc<dyn RecordingStore>) -> Self {
        Self { recordings }
    }

    /// Apply a status change and return the updated recording.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        recording_id: &str,
        new_status: RecordingStatus,
    ) -> Result<Recording> {
        let current = self
            .recordings
            .get(recording_id)
            .await?
            .ok_or_else(|| FieldcastError::NotFound(format!("recording {}", recording_id)))?;

        if !is_standard_transition(current.status, new_status) {
            warn!(
                from = %current.status,
                to = %new_status,
                "Non-standard review transition applied"
            );
        }

        self.recordings.update_status(recording_id, new_status).await?;
        info!(status = %new_status, "Recording status updated");

        self.recordings
            .get(recording_id)
            .await?
            .ok_or_else(|| FieldcastError::NotFound(format!("recording {}", recording_id)))
    }
}

/// Whether a transition follows the standard review flow. Setting the same
/// status again counts as standard (idempotent re-application).
fn is_standard_transition(from: RecordingStatus, to: RecordingStatus) -> bool {
    use RecordingStatus::*;
    match (from, to) {
        (a, b) if a == b => true,
        (Pending, Transcribed) => true,
        (Transcribed, Approved) | (Transcribed, Rejected) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Recording;
    use crate::store::{RecordingStore, SqliteStore};
    use chrono::Utc;

    fn recording(id: &str, status: RecordingStatus) -> Recording {
        Recording {
            id: id.to_string(),
            mission_id: "m1".to_string(),
            mission_title: "Shelf check".to_string(),
            promoter_id: "p1".to_string(),
            promoter_name: "Ana".to_string(),
            store_id: "s1".to_string(),
            store_name: "Mercado Azul".to_string(),
            store_city: "Recife".to_string(),
            audio: None,
            transcript: "report text".to_string(),
            duration_seconds: 10.0,
            score: 0,
            status,
            created_at: Utc::now(),
            analysis: None,
        }
    }

    #[test]
    fn test_standard_transitions() {
        use RecordingStatus::*;
        assert!(is_standard_transition(Pending, Transcribed));
        assert!(is_standard_transition(Transcribed, Approved));
        assert!(is_standard_transition(Transcribed, Rejected));
        assert!(is_standard_transition(Approved, Approved));
        assert!(!is_standard_transition(Rejected, Approved));
        assert!(!is_standard_transition(Pending, Approved));
    }

    #[tokio::test]
    async fn test_set_status_applies_change() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        store
            .insert(&recording("r1", RecordingStatus::Transcribed))
            .await
            .unwrap();

        let workflow = ReviewWorkflow::new(store.clone());
        let updated = workflow
            .set_status("r1", RecordingStatus::Approved)
            .await
            .unwrap();
        assert_eq!(updated.status, RecordingStatus::Approved);
    }

    #[tokio::test]
    async fn test_set_status_permissive_on_terminal_state() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        store
            .insert(&recording("r1", RecordingStatus::Rejected))
            .await
            .unwrap();

        // Not blocked, only logged: rejected -> approved is an admin override
        let workflow = ReviewWorkflow::new(store.clone());
        let updated = workflow
            .set_status("r1", RecordingStatus::Approved)
            .await
            .unwrap();
        assert_eq!(updated.status, RecordingStatus::Approved);
    }

    #[tokio::test]
    async fn test_set_status_unknown_recording() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let workflow = ReviewWorkflow::new(store);
        let err = workflow
            .set_status("nope", RecordingStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, FieldcastError::NotFound(_)));
    }
}
