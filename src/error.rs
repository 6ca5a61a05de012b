// File: src/error.rs
use thiserror::Error;

/// Errors raised at the crate boundary. Detection itself never fails.
#[derive(Debug, Error)]
pub enum QalqalahError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rule config: {0}")]
    InvalidConfig(String),

    #[error("too many ayahs to number from {0}")]
    AyahNumberOverflow(u32),
}

impl From<tempfile::PersistError> for QalqalahError {
    fn from(e: tempfile::PersistError) -> Self {
        QalqalahError::Io(e.error)
    }
}

pub type Result<T> = std::result::Result<T, QalqalahError>;
