#![forbid(unsafe_code)]

pub mod error;
pub mod study;

pub use flashcards_core::Clock;

pub use error::StudyError;
pub use study::{CardFace, EntryRow, StudyLoopService, StudySession};
