use announcer_core::{HttpError, error_response};
use announcer_storage::StorageError;
use axum::response::{IntoResponse, Response};
use face::DetectionError;
use http::StatusCode;
use thiserror::Error;
use tts::TtsError;

pub const NO_FILE_PART: &str = "No file part";
pub const NO_FILE_SELECTED: &str = "No file selected";

/// Failures of `POST /analyze`
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The upload is missing or unusable
    #[error("{0}")]
    Validation(String),

    /// The request body exceeds the configured upload limit
    #[error("upload exceeds the maximum size")]
    PayloadTooLarge,

    /// Face-analysis capability failed
    #[error(transparent)]
    Detection(#[from] DetectionError),

    /// Text-to-speech capability failed
    #[error(transparent)]
    Synthesis(#[from] TtsError),

    /// Writing the clip to disk failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl HttpError for AnalyzeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Detection(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Detection(_) | Self::Synthesis(_) => StatusCode::BAD_GATEWAY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Validation(_) | Self::PayloadTooLarge => "invalid_request_error",
            Self::Detection(e) if e.is_client_error() => "invalid_request_error",
            Self::Detection(_) | Self::Synthesis(_) => "upstream_error",
            Self::Storage(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::PayloadTooLarge => self.to_string(),
            Self::Detection(e) if e.is_client_error() => "uploaded file is not a supported image".to_owned(),
            Self::Detection(_) => "face detection service failed".to_owned(),
            Self::Synthesis(_) => "speech synthesis service failed".to_owned(),
            Self::Storage(_) => "failed to store audio clip".to_owned(),
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        error_response(&self)
    }
}

/// Failures of `GET /audio/{filename}`
#[derive(Debug, Error)]
#[error(transparent)]
pub struct AudioError(#[from] pub StorageError);

impl HttpError for AudioError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            StorageError::NotFound(_) | StorageError::InvalidFilename(_) => StatusCode::NOT_FOUND,
            StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self.0 {
            StorageError::NotFound(_) | StorageError::InvalidFilename(_) => "not_found_error",
            StorageError::Io(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self.0 {
            StorageError::NotFound(_) | StorageError::InvalidFilename(_) => "audio clip not found".to_owned(),
            StorageError::Io(_) => "failed to read audio clip".to_owned(),
        }
    }
}

impl IntoResponse for AudioError {
    fn into_response(self) -> Response {
        error_response(&self)
    }
}
