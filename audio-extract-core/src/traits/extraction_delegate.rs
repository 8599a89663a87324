use crate::models::artifact::ExtractedArtifact;
use crate::models::error::ExtractError;
use crate::models::state::ExtractionState;

/// Event delegate for extraction notifications.
///
/// Called from whichever thread drives the orchestrator (the one calling
/// `process_events`), never from the playback thread.
pub trait ExtractionDelegate: Send + Sync {
    /// Called when the orchestrator state changes.
    fn on_state_changed(&self, state: &ExtractionState);

    /// Called when an extraction or load fails.
    fn on_error(&self, error: &ExtractError);

    /// Called when a new artifact has been published.
    fn on_artifact_ready(&self, artifact: &ExtractedArtifact);
}
