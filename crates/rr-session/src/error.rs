use rr_core::RrError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session configuration error: {0}")]
    Config(#[from] RrError),

    #[error("session is not connected")]
    NotConnected,

    #[error("session is already connected")]
    AlreadyConnected,
}

pub type SessionResult<T> = Result<T, SessionError>;
