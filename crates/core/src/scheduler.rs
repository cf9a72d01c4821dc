use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::model::{Card, CardId, ProgressSnapshot, ReviewGrade};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("deck is empty")]
    EmptyDeck,
    #[error("card index {index} is out of range for a deck of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("due date overflows the calendar: {today} + {offset_days} days")]
    DateOutOfRange { today: NaiveDate, offset_days: u64 },
}

//
// ─── GRADED CARD ───────────────────────────────────────────────────────────────
//

/// Outcome of grading the current card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedCard {
    pub card_id: CardId,
    pub grade: ReviewGrade,
    pub due_date: NaiveDate,
}

//
// ─── SCHEDULER ─────────────────────────────────────────────────────────────────
//

/// Due-date ordered deck with a wrapping cursor.
///
/// The deck is sorted once at construction and never reordered afterwards;
/// grading only changes the recorded due date.
///
/// # Examples
///
/// ```
/// # use flashcards_core::model::{Card, CardId, ProgressSnapshot};
/// # use flashcards_core::ReviewScheduler;
/// let catalog = vec![
///     Card::new(CardId::new("a").unwrap(), "apple", "n", "a fruit"),
///     Card::new(CardId::new("b").unwrap(), "run", "v", "move fast"),
/// ];
/// let mut scheduler = ReviewScheduler::new(catalog, &ProgressSnapshot::new());
/// assert_eq!(scheduler.current().unwrap().word(), "apple");
/// scheduler.next().unwrap();
/// assert_eq!(scheduler.current().unwrap().word(), "run");
/// ```
#[derive(Debug, Clone)]
pub struct ReviewScheduler {
    deck: Vec<Card>,
    index: usize,
}

impl ReviewScheduler {
    /// Builds the deck by stable-sorting `catalog` on each card's due date.
    ///
    /// Unseen cards go last; cards with equal dates keep their catalog order.
    #[must_use]
    pub fn new(catalog: Vec<Card>, snapshot: &ProgressSnapshot) -> Self {
        let mut deck = catalog;
        deck.sort_by_key(|card| snapshot.due(card.id()));
        Self { deck, index: 0 }
    }

    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// The card under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::EmptyDeck` if the catalog had no cards.
    pub fn current(&self) -> Result<&Card, SchedulerError> {
        self.deck.get(self.index).ok_or(SchedulerError::EmptyDeck)
    }

    /// Move the cursor back one card, wrapping to the end.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::EmptyDeck` if there is nothing to navigate.
    pub fn previous(&mut self) -> Result<(), SchedulerError> {
        let len = self.non_empty_len()?;
        self.index = (self.index + len - 1) % len;
        Ok(())
    }

    /// Move the cursor forward one card, wrapping to the start.
    ///
    /// Call this after [`grade_current`](Self::grade_current) to advance past
    /// the graded card.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::EmptyDeck` if there is nothing to navigate.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<(), SchedulerError> {
        let len = self.non_empty_len()?;
        self.index = (self.index + 1) % len;
        Ok(())
    }

    /// Jump directly to the card at `index` in deck order.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::IndexOutOfRange` if `index` is past the end.
    pub fn select(&mut self, index: usize) -> Result<(), SchedulerError> {
        if index >= self.deck.len() {
            return Err(SchedulerError::IndexOutOfRange {
                index,
                len: self.deck.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// Record a new due date for the card under the cursor.
    ///
    /// The due date is `today` plus the grade's fixed offset. The cursor does
    /// not move and the deck keeps its order; the caller persists `snapshot`
    /// and then calls [`next`](Self::next).
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::EmptyDeck` on an empty deck, or
    /// `SchedulerError::DateOutOfRange` if the date cannot be represented.
    pub fn grade_current(
        &self,
        grade: ReviewGrade,
        today: NaiveDate,
        snapshot: &mut ProgressSnapshot,
    ) -> Result<GradedCard, SchedulerError> {
        let card = self.current()?;
        let due_date = due_date_for(grade, today)?;
        snapshot.set_due_date(card.id().clone(), due_date);
        Ok(GradedCard {
            card_id: card.id().clone(),
            grade,
            due_date,
        })
    }

    fn non_empty_len(&self) -> Result<usize, SchedulerError> {
        match self.deck.len() {
            0 => Err(SchedulerError::EmptyDeck),
            len => Ok(len),
        }
    }
}

/// Next due date for a card graded `grade` on `today`.
///
/// # Errors
///
/// Returns `SchedulerError::DateOutOfRange` if the result overflows the calendar.
pub fn due_date_for(grade: ReviewGrade, today: NaiveDate) -> Result<NaiveDate, SchedulerError> {
    let offset_days = grade.offset_days();
    today
        .checked_add_days(Days::new(offset_days))
        .ok_or(SchedulerError::DateOutOfRange { today, offset_days })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
