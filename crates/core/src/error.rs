use thiserror::Error;

use crate::model::{ImageError, ParseIdError, UnknownLanguage};
use crate::schedule::ScheduleError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),
    #[error(transparent)]
    Language(#[from] UnknownLanguage),
    #[error(transparent)]
    Image(#[from] ImageError),
}
