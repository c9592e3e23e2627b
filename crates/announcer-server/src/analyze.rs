use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{Json, extract::State};
use face::{BoundingBox, select_primary};
use http::HeaderMap;
use serde::Serialize;
use tts::{AudioFormat, SpeechRequest};
use url::Url;

use crate::{error::AnalyzeError, state::AppState, upload::ImageUpload};

/// Body of a successful `POST /analyze`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub emotion: String,
    pub audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// Sentence spoken for a detected emotion
pub fn announcement(emotion: &str) -> String {
    format!("The primary emotion is {emotion}")
}

/// Detect the primary emotion in an uploaded image and announce it
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    upload: ImageUpload,
) -> Result<Json<AnalysisResponse>, AnalyzeError> {
    tracing::debug!(
        image_len = upload.bytes.len(),
        filename = upload.filename.as_deref().unwrap_or(""),
        content_type = upload.content_type.as_deref().unwrap_or(""),
        "analyze request received"
    );

    let faces = state.detector.detect(&upload.bytes).await?;
    let selection = select_primary(&faces);

    tracing::debug!(
        detector = state.detector.name(),
        faces = faces.len(),
        emotion = %selection.emotion,
        "primary emotion selected"
    );

    let format = AudioFormat::Mp3;
    let speech = state
        .synthesizer
        .synthesize(SpeechRequest {
            input: announcement(&selection.emotion),
            voice: state.voice.clone(),
            format,
        })
        .await?;

    let clip = state.store.save(&speech.audio, format.extension()).await?;

    let base = base_url(state.public_url.as_ref(), state.trust_forwarded_headers, &headers);
    let audio_url = format!("{base}/audio/{}?t={}", clip.filename, unix_millis());

    tracing::info!(emotion = %selection.emotion, clip = %clip.filename, bytes = clip.size, "emotion announced");

    Ok(Json(AnalysisResponse {
        emotion: selection.emotion,
        audio_url,
        bounding_box: selection.bounding_box,
    }))
}

/// Scheme and authority clients should use to reach this server
///
/// A configured public URL wins. Otherwise the `Host` header is used, with
/// reverse-proxy headers taking precedence only when they are trusted.
pub fn base_url(public_url: Option<&Url>, trust_forwarded: bool, headers: &HeaderMap) -> String {
    if let Some(url) = public_url {
        return url.as_str().trim_end_matches('/').to_owned();
    }

    let first_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };
    let forwarded = |name: &str| if trust_forwarded { first_value(name) } else { None };

    let scheme = forwarded("x-forwarded-proto").unwrap_or("http");
    let host = forwarded("x-forwarded-host")
        .or_else(|| first_value(http::header::HOST.as_str()))
        .unwrap_or("localhost");

    format!("{scheme}://{host}")
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
