use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::card::CardError;

/// Unique identifier for a Card, as given by the catalog.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    /// Creates a new `CardId`.
    ///
    /// # Errors
    ///
    /// Returns `CardError::BlankId` if the id is empty or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, CardError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CardError::BlankId);
        }
        Ok(Self(id))
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({:?})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

impl FromStr for CardId {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardId::new(s)
    }
}

impl TryFrom<String> for CardId {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CardId::new(value)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.0
    }
}

impl AsRef<str> for CardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
