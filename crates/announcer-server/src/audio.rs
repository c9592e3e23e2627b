use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use http::header;
use tts::AudioFormat;

use crate::{error::AudioError, state::AppState};

/// Serve a stored clip by file name
///
/// Query parameters (the cache-buster on `audioUrl`) are ignored.
pub async fn serve_audio(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, AudioError> {
    let audio = state.store.read(&filename).await?;

    tracing::debug!(%filename, bytes = audio.len(), "serving audio clip");

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&filename)),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        audio,
    )
        .into_response())
}

fn content_type_for(filename: &str) -> &'static str {
    let format = AudioFormat::Mp3;
    match filename.rsplit_once('.') {
        Some((_, ext)) if ext.eq_ignore_ascii_case(format.extension()) => format.content_type(),
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::content_type_for;

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("emotion_1.mp3"), "audio/mpeg");
        assert_eq!(content_type_for("emotion_1.MP3"), "audio/mpeg");
        assert_eq!(content_type_for("emotion_1.wav"), "application/octet-stream");
        assert_eq!(content_type_for("emotion_1"), "application/octet-stream");
    }
}
