#![allow(clippy::must_use_candidate)]

pub mod audio;
pub mod aws;
pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod speech;
pub mod telemetry;

use serde::Deserialize;

pub use audio::*;
pub use aws::*;
pub use cors::*;
pub use health::*;
pub use server::*;
pub use speech::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig, TracingConfig};

/// Top-level announcer configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// AWS region, credentials and client tuning shared by Rekognition and Polly
    #[serde(default)]
    pub aws: AwsConfig,
    /// Speech synthesis voice settings
    #[serde(default)]
    pub speech: SpeechConfig,
    /// Where synthesized clips are written and how long they live
    #[serde(default)]
    pub audio: AudioConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
