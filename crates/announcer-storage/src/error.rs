use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Audio storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// No clip with this name exists
    #[error("audio clip not found: {0}")]
    NotFound(String),

    /// Name is not a plain clip file name (path separators, hidden files, ...)
    #[error("invalid audio file name: {0:?}")]
    InvalidFilename(String),

    /// Underlying filesystem failure
    #[error("audio storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}
