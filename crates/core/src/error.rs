use mib_types::{LetterError, TextError};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid page: {0}")]
    InvalidPage(String),
    #[error("doctor not found: {0}")]
    NotFound(String),

    #[error("request to doctor repository failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("doctor repository returned {status} for {url}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("failed to read doctor file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to deserialize doctors: {0}")]
    Deserialization(serde_json::Error),

    #[error("invalid text: {0}")]
    Text(#[from] TextError),
    #[error("invalid letter: {0}")]
    Letter(#[from] LetterError),
}

impl DirectoryError {
    /// True when the failure means the record does not exist, rather than that the lookup failed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound(_))
    }
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
