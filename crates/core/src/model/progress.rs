use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::ids::CardId;

/// Serialized date format for due dates (`YYYY-MM-DD`).
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

//
// ─── DUE DATE ──────────────────────────────────────────────────────────────────
//

/// Scheduling position of a card.
///
/// Ordered so that every scheduled date sorts before `Unseen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DueDate {
    Scheduled(NaiveDate),
    Unseen,
}

impl DueDate {
    #[must_use]
    pub fn from_option(date: Option<NaiveDate>) -> Self {
        date.map_or(Self::Unseen, Self::Scheduled)
    }

    #[must_use]
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            DueDate::Scheduled(date) => Some(date),
            DueDate::Unseen => None,
        }
    }

    /// True when the card was due strictly before `today`.
    ///
    /// Unseen cards are never overdue.
    #[must_use]
    pub fn is_overdue(self, today: NaiveDate) -> bool {
        matches!(self, DueDate::Scheduled(date) if date < today)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDate::Scheduled(date) => write!(f, "{}", date.format(DUE_DATE_FORMAT)),
            DueDate::Unseen => f.write_str("Unseen"),
        }
    }
}

/// Serializes as the `YYYY-MM-DD` date, or `null` when unseen.
impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.date().serialize(serializer)
    }
}

//
// ─── PROGRESS ENTRY ────────────────────────────────────────────────────────────
//

/// Review metadata recorded for a single card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

//
// ─── PROGRESS SNAPSHOT ─────────────────────────────────────────────────────────
//

/// Per-card review state, keyed by card id.
///
/// Serializes as `{"<id>": {"dueDate": "YYYY-MM-DD"}}`. A card with no entry,
/// a `null` entry, or an entry without a due date is unseen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProgressSnapshot {
    entries: BTreeMap<CardId, ProgressEntry>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Due date for a card, or `None` if unseen.
    #[must_use]
    pub fn due_date(&self, card_id: &CardId) -> Option<NaiveDate> {
        self.entries.get(card_id).and_then(|entry| entry.due_date)
    }

    #[must_use]
    pub fn due(&self, card_id: &CardId) -> DueDate {
        DueDate::from_option(self.due_date(card_id))
    }

    /// Records a due date, creating the entry if it is missing.
    pub fn set_due_date(&mut self, card_id: CardId, date: NaiveDate) -> &mut Self {
        self.entries.entry(card_id).or_default().due_date = Some(date);
        self
    }

    #[must_use]
    pub fn entry(&self, card_id: &CardId) -> Option<&ProgressEntry> {
        self.entries.get(card_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(CardId, ProgressEntry)> for ProgressSnapshot {
    fn from_iter<I: IntoIterator<Item = (CardId, ProgressEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// `null` entries are dropped, leaving those cards unseen.
impl<'de> Deserialize<'de> for ProgressSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<CardId, Option<ProgressEntry>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(id, entry)| entry.map(|entry| (id, entry)))
            .collect())
    }
}
