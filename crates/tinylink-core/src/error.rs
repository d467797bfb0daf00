use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Faults raised by a storage backend.
///
/// These are opaque to the services: they are passed through unchanged and
/// never retried.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    /// Every generated candidate collided with an existing code.
    ///
    /// Nothing was written; the caller may retry the whole submission.
    #[error("could not allocate a unique short code after {attempts} attempts, please try again")]
    ExhaustedRetries { attempts: u32 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}
