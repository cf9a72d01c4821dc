//! Shared error types for the services crate.

use thiserror::Error;

use flashcards_core::scheduler::SchedulerError;
use storage::repository::StorageError;

/// Errors emitted by study sessions and `StudyLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StudyError {
    /// True when the failure happened while writing progress.
    ///
    /// The in-memory snapshot still holds the attempted update in that case.
    #[must_use]
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, StudyError::Storage(_))
    }
}
