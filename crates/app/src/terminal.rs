//! Line-oriented terminal view over a `StudySession`.

use std::fmt;

use chrono::NaiveDate;
use flashcards_core::PosLabels;
use flashcards_core::model::ReviewGrade;
use services::{CardFace, EntryRow, StudyError, StudySession};

/// Which side of the card is showing. Purely a view concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }
}

/// A learner action typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Flip,
    Previous,
    Next,
    Grade(ReviewGrade),
    List,
    Jump(usize),
    Help,
    Quit,
}

#[derive(Debug)]
pub enum IntentError {
    Unknown(String),
    InvalidRow(String),
    Grade(flashcards_core::Error),
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentError::Unknown(raw) => write!(f, "unknown command: {raw}"),
            IntentError::InvalidRow(raw) => write!(f, "invalid row number: {raw}"),
            IntentError::Grade(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for IntentError {}

/// Parse one input line.
///
/// An empty line flips the card. Rows are numbered from 1 as printed by the
/// entry list.
pub fn parse_intent(line: &str) -> Result<Intent, IntentError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Intent::Flip);
    };

    match head {
        "f" | "flip" => Ok(Intent::Flip),
        "p" | "prev" | "back" => Ok(Intent::Previous),
        "n" | "next" | "skip" => Ok(Intent::Next),
        "1" => Ok(Intent::Grade(ReviewGrade::Again)),
        "2" => Ok(Intent::Grade(ReviewGrade::Good)),
        "3" => Ok(Intent::Grade(ReviewGrade::Easy)),
        "l" | "list" => Ok(Intent::List),
        "h" | "help" | "?" => Ok(Intent::Help),
        "q" | "quit" | "exit" => Ok(Intent::Quit),
        "g" | "go" => {
            let raw = parts.next().unwrap_or_default();
            raw.parse::<usize>()
                .ok()
                .and_then(|row| row.checked_sub(1))
                .map(Intent::Jump)
                .ok_or_else(|| IntentError::InvalidRow(raw.to_owned()))
        }
        "grade" => {
            let raw = parts.next().unwrap_or_default();
            raw.parse::<ReviewGrade>()
                .map(Intent::Grade)
                .map_err(|err| IntentError::Grade(err.into()))
        }
        other => other
            .parse::<ReviewGrade>()
            .map(Intent::Grade)
            .map_err(|_| IntentError::Unknown(other.to_owned())),
    }
}

pub fn print_help() {
    println!("Commands:");
    println!("  f / <enter>  flip the card");
    println!("  p / n        previous / next card");
    println!("  1 | again    due tomorrow, then next card");
    println!("  2 | good     due in 3 days, then next card");
    println!("  3 | easy     due in 7 days, then next card");
    println!("  l            list all entries");
    println!("  g <row>      jump to a row of the list");
    println!("  q            quit");
}

/// Render the current card.
///
/// # Errors
///
/// Returns `StudyError::Scheduler` if the deck is empty.
pub fn render_card(
    session: &StudySession,
    labels: &PosLabels,
    side: Side,
) -> Result<(), StudyError> {
    let face = session.current_face(labels)?;
    println!();
    println!(
        "[{}/{}] {}",
        session.index() + 1,
        session.total_cards(),
        face.word
    );
    if side == Side::Back {
        print_back(&face);
    }
    Ok(())
}

fn print_back(face: &CardFace) {
    println!("  ({}) {}", face.pos_label, face.definition);
    for (kind, uri) in [
        ("image", &face.image),
        ("audio", &face.audio),
        ("video", &face.video),
    ] {
        if let Some(uri) = uri {
            println!("  {kind}: {uri}");
        }
    }
}

/// Render the entry list as a table.
pub fn render_entries(rows: &[EntryRow]) {
    let id_width = column_width(rows.iter().map(|r| r.id.as_str()), 2);
    let word_width = column_width(rows.iter().map(|r| r.word.as_str()), 4);

    println!(
        "    {:>4}  {:<id_width$}  {:<word_width$}  due",
        "row", "id", "word"
    );
    for row in rows {
        let marker = if row.highlighted { '>' } else { ' ' };
        let overdue = if row.overdue { "  (overdue)" } else { "" };
        println!(
            "  {marker} {:>4}  {:<id_width$}  {:<word_width$}  {}{overdue}",
            row.index + 1,
            row.id.as_str(),
            row.word,
            row.due,
        );
    }
}

/// Widest value in characters, never narrower than `min`.
///
/// `{:<width$}` pads by `char`, so widths are counted the same way.
fn column_width<'a>(values: impl Iterator<Item = &'a str>, min: usize) -> usize {
    values.map(|value| value.chars().count()).fold(min, usize::max)
}

/// Print the entry list for `today`.
pub fn render_list(session: &StudySession, today: NaiveDate) {
    render_entries(&session.entries(today));
}
