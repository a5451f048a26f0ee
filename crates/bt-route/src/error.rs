use bt_core::StopId;
use thiserror::Error;

use crate::StopStatus;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route has no stops")]
    Empty,

    #[error("stop ids must strictly increase: {prev} is followed by {next}")]
    NonIncreasingId { prev: StopId, next: StopId },

    #[error("no stop has status `current`")]
    NoCurrentStop,

    #[error("{count} stops have status `current`; expected exactly one")]
    MultipleCurrentStops { count: usize },

    #[error("stop at index {index} is `{status}` but the current stop is at {current}")]
    StatusOrder {
        index:   usize,
        status:  StopStatus,
        current: usize,
    },

    #[error("stop index {index} is out of range for a route of {len} stops")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("route path: {0}")]
    Path(String),

    #[error("route parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
