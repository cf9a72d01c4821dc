use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur during review operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("invalid review grade: {0:?} (expected again, good or easy)")]
    InvalidGrade(String),
}

//
// ─── REVIEW GRADE ─────────────────────────────────────────────────────────────
//

/// Three-level self-assessment for card reviews.
///
/// Each grade maps to a fixed number of days until the card is due again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewGrade {
    /// Failed to recall the answer. Due tomorrow.
    Again,
    /// Recalled correctly. Due in three days.
    Good,
    /// Recalled instantly. Due in a week.
    Easy,
}

impl ReviewGrade {
    pub const ALL: [ReviewGrade; 3] = [ReviewGrade::Again, ReviewGrade::Good, ReviewGrade::Easy];

    /// Days between the review day and the next due date.
    #[must_use]
    pub fn offset_days(self) -> u64 {
        match self {
            ReviewGrade::Again => 1,
            ReviewGrade::Good => 3,
            ReviewGrade::Easy => 7,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewGrade::Again => "again",
            ReviewGrade::Good => "good",
            ReviewGrade::Easy => "easy",
        }
    }
}

impl fmt::Display for ReviewGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewGrade {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" => Ok(Self::Again),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            _ => Err(ReviewError::InvalidGrade(s.to_owned())),
        }
    }
}
