use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis failures
#[derive(Debug, Error)]
pub enum TtsError {
    /// Request rejected before or by the provider (empty text, unsupported voice)
    #[error("invalid speech request: {0}")]
    InvalidRequest(String),

    /// Provider returned an error response
    #[error("speech provider error ({code}): {message}")]
    ProviderApiError { code: String, message: String },

    /// Provider unreachable, timed out, or the audio stream broke mid-read
    #[error("speech provider connection error: {0}")]
    ConnectionError(String),

    /// Provider answered with zero bytes of audio
    #[error("speech provider returned no audio")]
    EmptyAudio,
}
