use chrono::NaiveDate;
use serde::Serialize;

use flashcards_core::PosLabels;
use flashcards_core::model::{CardId, DueDate};

use super::session::StudySession;
use crate::error::StudyError;

/// One row of the entry list shown beside the card.
///
/// Presentation-agnostic: `due` is a typed value, and the view decides how to
/// render `Unseen` and overdue dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    pub index: usize,
    pub id: CardId,
    pub word: String,
    pub due: DueDate,
    pub overdue: bool,
    pub highlighted: bool,
}

/// Both sides of the current card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFace {
    pub id: CardId,
    pub word: String,
    pub pos_label: String,
    pub definition: String,
    pub image: Option<String>,
    pub audio: Option<String>,
    pub video: Option<String>,
}

impl StudySession {
    /// Rows for every card in deck order, with the current card highlighted.
    #[must_use]
    pub fn entries(&self, today: NaiveDate) -> Vec<EntryRow> {
        self.deck()
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let due = self.due_date_of(card.id());
                EntryRow {
                    index,
                    id: card.id().clone(),
                    word: card.word().to_owned(),
                    due,
                    overdue: due.is_overdue(today),
                    highlighted: index == self.index(),
                }
            })
            .collect()
    }

    /// Front and back content of the current card.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Scheduler` if the deck is empty.
    pub fn current_face(&self, labels: &PosLabels) -> Result<CardFace, StudyError> {
        let card = self.current()?;
        Ok(CardFace {
            id: card.id().clone(),
            word: card.word().to_owned(),
            pos_label: labels.label(card.pos()).to_owned(),
            definition: card.definition().to_owned(),
            image: card.image().map(str::to_owned),
            audio: card.audio().map(str::to_owned),
            video: card.video().map(str::to_owned),
        })
    }
}
