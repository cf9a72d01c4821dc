use chrono::NaiveDate;

use flashcards_core::model::{Card, CardId, DueDate, ProgressSnapshot, ReviewGrade};
use flashcards_core::{GradedCard, ReviewScheduler};

use crate::error::StudyError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory study session over the whole catalog.
///
/// Owns the due-date ordered deck, the cursor, and the progress snapshot the
/// deck was built from. Grading goes through `StudyLoopService`, which also
/// persists the snapshot; navigation is purely local.
///
/// Expected call sequence for a graded card: `grade_current` on the service,
/// then `next` here.
#[derive(Debug, Clone)]
pub struct StudySession {
    scheduler: ReviewScheduler,
    snapshot: ProgressSnapshot,
}

impl StudySession {
    /// Build a session, sorting `catalog` once by the due dates in `snapshot`.
    #[must_use]
    pub fn new(catalog: Vec<Card>, snapshot: ProgressSnapshot) -> Self {
        let scheduler = ReviewScheduler::new(catalog, &snapshot);
        Self {
            scheduler,
            snapshot,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &[Card] {
        self.scheduler.deck()
    }

    #[must_use]
    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.scheduler.index()
    }

    /// Total number of cards in the deck.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.scheduler.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheduler.is_empty()
    }

    /// # Errors
    ///
    /// Returns `StudyError::Scheduler` if the deck is empty.
    pub fn current(&self) -> Result<&Card, StudyError> {
        Ok(self.scheduler.current()?)
    }

    /// # Errors
    ///
    /// Returns `StudyError::Scheduler` if the deck is empty.
    pub fn previous(&mut self) -> Result<(), StudyError> {
        Ok(self.scheduler.previous()?)
    }

    /// # Errors
    ///
    /// Returns `StudyError::Scheduler` if the deck is empty.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<(), StudyError> {
        Ok(self.scheduler.next()?)
    }

    /// Jump to a row of the entry list.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Scheduler` if `index` is outside the deck.
    pub fn select(&mut self, index: usize) -> Result<(), StudyError> {
        Ok(self.scheduler.select(index)?)
    }

    /// Due date of a card, or `DueDate::Unseen`.
    #[must_use]
    pub fn due_date_of(&self, card_id: &CardId) -> DueDate {
        self.snapshot.due(card_id)
    }

    #[must_use]
    pub fn is_overdue(&self, card_id: &CardId, today: NaiveDate) -> bool {
        self.due_date_of(card_id).is_overdue(today)
    }

    /// Apply `grade` to the current card in memory only.
    pub(crate) fn grade_in_memory(
        &mut self,
        grade: ReviewGrade,
        today: NaiveDate,
    ) -> Result<GradedCard, StudyError> {
        Ok(self
            .scheduler
            .grade_current(grade, today, &mut self.snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashcards_core::scheduler::SchedulerError;
    use flashcards_core::time::fixed_today;

    fn card(id: &str) -> Card {
        Card::new(CardId::new(id).unwrap(), format!("word-{id}"), "n", "def")
    }

    fn id(raw: &str) -> CardId {
        CardId::new(raw).unwrap()
    }

    #[test]
    fn new_session_starts_at_first_card() {
        let session = StudySession::new(vec![card("a"), card("b")], ProgressSnapshot::new());
        assert_eq!(session.index(), 0);
        assert_eq!(session.total_cards(), 2);
        assert_eq!(session.current().unwrap().id(), &id("a"));
    }

    #[test]
    fn grade_in_memory_keeps_cursor_and_order() {
        let mut session =
            StudySession::new(vec![card("a"), card("b"), card("c")], ProgressSnapshot::new());
        session.next().unwrap();

        let graded = session
            .grade_in_memory(ReviewGrade::Again, fixed_today())
            .unwrap();

        assert_eq!(graded.card_id, id("b"));
        assert_eq!(session.index(), 1);
        assert_eq!(session.due_date_of(&id("b")).to_string(), "2024-01-02");
        assert_eq!(session.due_date_of(&id("a")), DueDate::Unseen);
        let order: Vec<_> = session.deck().iter().map(|c| c.id().as_str()).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }

    #[test]
    fn overdue_only_for_past_due_dates() {
        let mut snapshot = ProgressSnapshot::new();
        snapshot
            .set_due_date(id("a"), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())
            .set_due_date(id("b"), fixed_today());
        let session = StudySession::new(vec![card("a"), card("b"), card("c")], snapshot);

        assert!(session.is_overdue(&id("a"), fixed_today()));
        assert!(!session.is_overdue(&id("b"), fixed_today()));
        assert!(!session.is_overdue(&id("c"), fixed_today()));
    }

    #[test]
    fn empty_session_reports_empty_deck() {
        let mut session = StudySession::new(Vec::new(), ProgressSnapshot::new());
        assert!(session.is_empty());
        assert!(matches!(
            session.current(),
            Err(StudyError::Scheduler(SchedulerError::EmptyDeck))
        ));
        assert!(matches!(
            session.next(),
            Err(StudyError::Scheduler(SchedulerError::EmptyDeck))
        ));
        assert!(matches!(
            session.grade_in_memory(ReviewGrade::Good, fixed_today()),
            Err(StudyError::Scheduler(SchedulerError::EmptyDeck))
        ));
    }
}
