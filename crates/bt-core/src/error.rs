//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `BtError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The base error type for `bt-core` and configuration validation.
#[derive(Debug, Error)]
pub enum BtError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `bt-*` crates.
pub type BtResult<T> = Result<T, BtError>;
