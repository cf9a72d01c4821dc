#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod pos;
pub mod scheduler;
pub mod time;

pub use error::Error;
pub use pos::PosLabels;
pub use scheduler::{GradedCard, ReviewScheduler, SchedulerError};
pub use time::Clock;
