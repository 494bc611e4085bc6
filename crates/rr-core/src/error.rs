//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `RrError` as one variant
//! via `From` where they surface core failures.

use thiserror::Error;

/// The top-level error type for `rr-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RrError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `rr-*` crates.
pub type RrResult<T> = Result<T, RrError>;
