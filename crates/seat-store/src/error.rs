//! Session error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors from floor-plan session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An index-addressed patch pointed past the end of the entity list.
    #[error("Entity index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// No entity with this id exists in the current run.
    #[error("Entity not found: {0}")]
    EntityNotFound(Uuid),

    /// An analysis is already in flight; the new trigger is dropped.
    #[error("An analysis is already in progress")]
    AlreadyAnalyzing,

    /// A detector response arrived for a request that is no longer pending.
    #[error("Stale analysis response (ticket {ticket}, run {run_id}) discarded")]
    StaleRun { ticket: Uuid, run_id: Uuid },
}

impl StoreError {
    /// Whether the caller should silently drop this error instead of
    /// surfacing it to the user.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::StaleRun { .. } | Self::AlreadyAnalyzing)
    }
}
