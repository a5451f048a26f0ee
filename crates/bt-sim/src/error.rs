use bt_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("movement engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("simulation has been disposed")]
    Disposed,
}

pub type SimResult<T> = Result<T, SimError>;
