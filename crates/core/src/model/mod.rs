mod card;
mod ids;
mod progress;
mod review;

pub use card::{Card, CardError};
pub use ids::CardId;
pub use progress::{DUE_DATE_FORMAT, DueDate, ProgressEntry, ProgressSnapshot};
pub use review::{ReviewError, ReviewGrade};
