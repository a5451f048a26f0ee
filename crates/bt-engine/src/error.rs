use bt_core::BtError;
use bt_route::RouteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] BtError),

    #[error("invalid route: {0}")]
    Route(#[from] RouteError),

    #[error("a segment leaving stop {index} is already in progress")]
    AlreadyMoving { index: usize },

    #[error("stop {index} is the final stop; there is no next segment")]
    AtFinalStop { index: usize },

    #[error("engine is paused")]
    Paused,

    #[error("engine has been disposed")]
    Disposed,

    #[error("arrival at index {index} is past the last stop (route has {len})")]
    PastLastStop { index: usize, len: usize },
}

pub type EngineResult<T> = Result<T, EngineError>;
