use thiserror::Error;

use crate::model::ReviewError;
use crate::scheduler::SchedulerError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}
