use axum::{
    body::Body,
    extract::{FromRequest, Multipart, multipart::MultipartError},
};
use http::StatusCode;

use crate::error::{AnalyzeError, NO_FILE_PART, NO_FILE_SELECTED};

/// Form field carrying the image
const FILE_FIELD: &str = "file";

/// Image bytes taken from the `file` field of a multipart upload
#[derive(Debug)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl<S> FromRequest<S> for ImageUpload
where
    S: Send + Sync,
{
    type Rejection = AnalyzeError;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            return Err(AnalyzeError::Validation(NO_FILE_PART.to_owned()));
        }

        let mut multipart = Multipart::from_request(request, state).await.map_err(|e| {
            tracing::debug!(error = %e, "rejected multipart request");
            AnalyzeError::Validation(NO_FILE_PART.to_owned())
        })?;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let filename = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field.bytes().await.map_err(multipart_error)?;

            // Browsers submit an empty file name when nothing was chosen
            if bytes.is_empty() || filename.as_deref() == Some("") {
                return Err(AnalyzeError::Validation(NO_FILE_SELECTED.to_owned()));
            }

            return Ok(Self {
                bytes: bytes.to_vec(),
                filename,
                content_type,
            });
        }

        Err(AnalyzeError::Validation(NO_FILE_PART.to_owned()))
    }
}

fn multipart_error(err: MultipartError) -> AnalyzeError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AnalyzeError::PayloadTooLarge
    } else {
        AnalyzeError::Validation(format!("malformed multipart body: {}", err.body_text()))
    }
}
