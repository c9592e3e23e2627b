use thiserror::Error;

pub type Result<T> = std::result::Result<T, DetectionError>;

/// Face detection failures
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The service rejected the uploaded bytes (bad format, too large)
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The service returned an error response
    #[error("face detection service error: {0}")]
    Service(String),

    /// The service could not be reached or timed out
    #[error("face detection connection error: {0}")]
    Connection(String),
}

impl DetectionError {
    /// Whether the failure is attributable to the uploaded image
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidImage(_))
    }
}
