//! Mock AWS backend for integration tests
//!
//! Serves Rekognition `DetectFaces` (JSON 1.1 on `POST /`) and Polly
//! `SynthesizeSpeech` (`POST /v1/speech`) from a single endpoint

use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing,
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

const DETECT_FACES_TARGET: &str = "RekognitionService.DetectFaces";

/// How the mock Rekognition answers `DetectFaces`
#[derive(Clone)]
pub enum FaceBehavior {
    /// Return these `FaceDetails` entries verbatim
    Faces(serde_json::Value),
    /// Reject the image as an unsupported format
    InvalidImage,
    /// Refuse the call as unauthorized
    AccessDenied,
}

/// How the mock Polly answers `SynthesizeSpeech`
#[derive(Clone, Copy)]
pub enum SpeechBehavior {
    /// Return fake MP3 bytes for the requested text
    Audio,
    /// Fail with `ServiceFailureException`
    ServiceFailure,
}

/// One face with a bounding box and `(label, confidence)` emotions
pub fn face(width: f32, height: f32, emotions: &[(&str, f32)]) -> serde_json::Value {
    serde_json::json!({
        "BoundingBox": {"Width": width, "Height": height, "Left": 0.1, "Top": 0.1},
        "Emotions": emotions
            .iter()
            .map(|(label, confidence)| serde_json::json!({"Type": label, "Confidence": confidence}))
            .collect::<Vec<_>>(),
        "Confidence": 99.9
    })
}

/// Mock Rekognition + Polly backend
pub struct MockAws {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockAwsState>,
}

struct MockAwsState {
    faces: FaceBehavior,
    speech_behavior: SpeechBehavior,
    detect_count: AtomicU32,
    speech: Mutex<Vec<SpokenText>>,
}

/// Text and voice received by the mock Polly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenText {
    pub text: String,
    pub voice: String,
}

impl MockAws {
    /// Start a mock whose Rekognition returns the given faces
    pub async fn with_faces(faces: Vec<serde_json::Value>) -> anyhow::Result<Self> {
        Self::start(FaceBehavior::Faces(serde_json::Value::Array(faces))).await
    }

    /// Start the mock with an explicit detection behavior
    pub async fn start(faces: FaceBehavior) -> anyhow::Result<Self> {
        Self::start_with(faces, SpeechBehavior::Audio).await
    }

    /// Start the mock with explicit detection and synthesis behaviors
    pub async fn start_with(faces: FaceBehavior, speech: SpeechBehavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockAwsState {
            faces,
            speech_behavior: speech,
            detect_count: AtomicU32::new(0),
            speech: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/", routing::post(handle_rekognition))
            .route("/v1/speech", routing::post(handle_synthesize_speech))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Endpoint URL to configure as `aws.endpoint_url`
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of `DetectFaces` calls received
    pub fn detect_count(&self) -> u32 {
        self.state.detect_count.load(Ordering::Relaxed)
    }

    /// Every `SynthesizeSpeech` request received, in arrival order
    pub fn spoken(&self) -> Vec<SpokenText> {
        self.state.speech.lock().unwrap().clone()
    }
}

impl Drop for MockAws {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Bytes the mock Polly returns for a sentence
pub fn fake_mp3(text: &str) -> Vec<u8> {
    let mut audio = b"ID3mock".to_vec();
    audio.extend_from_slice(text.as_bytes());
    audio
}

fn amz_json(status: StatusCode, body: &serde_json::Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/x-amz-json-1.1")],
        body.to_string(),
    )
        .into_response()
}

async fn handle_rekognition(State(state): State<Arc<MockAwsState>>, headers: HeaderMap) -> Response {
    let target = headers.get("x-amz-target").and_then(|v| v.to_str().ok());
    if target != Some(DETECT_FACES_TARGET) {
        return amz_json(
            StatusCode::BAD_REQUEST,
            &serde_json::json!({"__type": "UnknownOperationException", "message": "unsupported target"}),
        );
    }

    state.detect_count.fetch_add(1, Ordering::Relaxed);

    match &state.faces {
        FaceBehavior::Faces(faces) => amz_json(StatusCode::OK, &serde_json::json!({"FaceDetails": faces})),
        FaceBehavior::InvalidImage => amz_json(
            StatusCode::BAD_REQUEST,
            &serde_json::json!({
                "__type": "InvalidImageFormatException",
                "message": "Request has invalid image format"
            }),
        ),
        FaceBehavior::AccessDenied => amz_json(
            StatusCode::BAD_REQUEST,
            &serde_json::json!({
                "__type": "AccessDeniedException",
                "message": "User AKIDTESTKEY is not authorized to perform: rekognition:DetectFaces"
            }),
        ),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SynthesizeSpeechRequest {
    text: String,
    voice_id: String,
    output_format: String,
}

async fn handle_synthesize_speech(
    State(state): State<Arc<MockAwsState>>,
    Json(request): Json<SynthesizeSpeechRequest>,
) -> Response {
    if request.output_format != "mp3" {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"message": "unexpected output format"})),
        )
            .into_response();
    }

    let audio = fake_mp3(&request.text);
    state.speech.lock().unwrap().push(SpokenText {
        text: request.text,
        voice: request.voice_id,
    });

    if matches!(state.speech_behavior, SpeechBehavior::ServiceFailure) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [
                (header::CONTENT_TYPE.as_str(), "application/json"),
                ("x-amzn-errortype", "ServiceFailureException"),
            ],
            Json(serde_json::json!({"message": "Polly internal failure for AKIDTESTKEY"})),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE.as_str(), "audio/mpeg"),
            ("x-amzn-requestcharacters", "32"),
        ],
        audio,
    )
        .into_response()
}
