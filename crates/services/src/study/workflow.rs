use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use flashcards_core::GradedCard;
use flashcards_core::model::{Card, ReviewGrade};
use storage::repository::{InMemoryProgressStore, ProgressStore};

use super::session::StudySession;
use crate::Clock;
use crate::error::StudyError;

/// Orchestrates session start and persisted grading.
///
/// This service owns the time source and the progress store. It does not
/// own presentation.
#[derive(Clone)]
pub struct StudyLoopService {
    clock: Clock,
    progress: Arc<dyn ProgressStore>,
}

impl StudyLoopService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressStore>) -> Self {
        Self { clock, progress }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Arc::new(InMemoryProgressStore::new()))
    }

    /// Today's local date according to the service clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Load saved progress and build a session over `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` if the saved progress cannot be read or
    /// is corrupt.
    pub async fn start_session(&self, catalog: Vec<Card>) -> Result<StudySession, StudyError> {
        let snapshot = self.progress.load().await?;
        let session = StudySession::new(catalog, snapshot);
        info!(
            cards = session.total_cards(),
            tracked = session.snapshot().len(),
            "study session started"
        );
        Ok(session)
    }

    /// Grade the current card and persist the whole snapshot.
    ///
    /// The cursor is left on the graded card; call `StudySession::next`
    /// afterwards to move on.
    ///
    /// If the write fails the new due date stays in the session's snapshot
    /// (it is not rolled back) and will be written by the next successful
    /// save, but until then it is not durable.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Scheduler` if the deck is empty, or
    /// `StudyError::Storage` if persisting the snapshot fails.
    pub async fn grade_current(
        &self,
        session: &mut StudySession,
        grade: ReviewGrade,
    ) -> Result<GradedCard, StudyError> {
        let today = self.clock.today();
        let graded = session.grade_in_memory(grade, today)?;
        debug!(
            card = %graded.card_id,
            grade = %graded.grade,
            due = %graded.due_date,
            "card graded"
        );

        if let Err(err) = self.progress.save(session.snapshot()).await {
            warn!(card = %graded.card_id, error = %err, "failed to persist progress");
            return Err(err.into());
        }

        Ok(graded)
    }
}
