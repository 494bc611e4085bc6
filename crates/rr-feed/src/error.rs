use rr_core::RrError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid ride event: {0}")]
    Invalid(String),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV decode error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Core(#[from] RrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FeedResult<T> = Result<T, FeedError>;
