#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod analyze;
mod audio;
mod aws;
mod cors;
mod diagnostics;
mod error;
mod health;
mod state;
mod upload;


use std::{net::SocketAddr, sync::Arc, time::Duration};

use announcer_config::Config;
use announcer_storage::AudioStore;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use face::{FaceDetector, RekognitionDetector};
use tower_http::trace::TraceLayer;
use tts::{PollyProvider, TtsProvider};

pub use analyze::{AnalysisResponse, announcement};
pub use error::{AnalyzeError, AudioError};
pub use state::CredentialStatus;

/// Port existing browser clients expect
const DEFAULT_PORT: u16 = 5000;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    retention: Option<Retention>,
}

/// Background clip eviction settings
struct Retention {
    store: AudioStore,
    keep_for: Duration,
    every: Duration,
}

impl Server {
    /// Build the server with AWS-backed face detection and speech synthesis
    ///
    /// # Errors
    ///
    /// Returns an error if the AWS configuration is invalid or the audio
    /// directory cannot be created
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let sdk_config = aws::load_sdk_config(&config.aws).await?;

        let detector = Arc::new(RekognitionDetector::new("rekognition", &sdk_config));
        let synthesizer = Arc::new(PollyProvider::new("polly", &sdk_config, &config.speech));

        tracing::info!(region = %config.aws.region, voice = %config.speech.voice, "AWS clients initialized");

        Self::with_providers(config, detector, synthesizer)
    }

    /// Build the server around caller-supplied capabilities
    ///
    /// # Errors
    ///
    /// Returns an error if the audio directory cannot be created or a
    /// duration setting is invalid
    pub fn with_providers(
        config: Config,
        detector: Arc<dyn FaceDetector>,
        synthesizer: Arc<dyn TtsProvider>,
    ) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));

        let store = AudioStore::new(&config.audio.directory).map_err(|e| {
            anyhow::anyhow!(
                "failed to open audio directory {}: {e}",
                config.audio.directory.display()
            )
        })?;

        let retention = config
            .audio
            .retention_duration()?
            .map(|keep_for| -> anyhow::Result<Retention> {
                Ok(Retention {
                    store: store.clone(),
                    keep_for,
                    every: config.audio.sweep_interval_duration()?,
                })
            })
            .transpose()?;

        let state = Arc::new(state::AppState {
            detector,
            synthesizer,
            store,
            voice: config.speech.voice.clone(),
            public_url: config.server.public_url.clone(),
            trust_forwarded_headers: config.server.trust_forwarded_headers,
            credentials: CredentialStatus::detect(&config.aws),
        });

        let mut app = Router::new()
            .route(
                "/analyze",
                post(analyze::analyze).layer(DefaultBodyLimit::max(config.server.max_upload_bytes)),
            )
            .route("/audio/{filename}", get(audio::serve_audio))
            .route("/test", get(diagnostics::credential_status))
            .with_state(state);

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        app = app
            .layer(TraceLayer::new_for_http())
            .layer(cors::cors_layer(&config.server.cors));

        Ok(Self {
            router: app,
            listen_address,
            retention,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener. The
    /// retention sweeper is not started.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered. The retention
    /// sweeper, when configured, runs alongside and stops with the server.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        let sweeper = self.retention.map(|retention| {
            announcer_storage::spawn_sweeper(retention.store, retention.keep_for, retention.every, shutdown.child_token())
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        if let Some(handle) = sweeper
            && let Err(e) = handle.await
        {
            tracing::warn!(error = %e, "audio retention sweeper panicked");
        }

        Ok(())
    }
}
