//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use announcer_config::{AudioConfig, AwsConfig, Config, CorsConfig, HealthConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder writing clips under `audio_dir` and sending AWS calls to `aws_endpoint`
    pub fn new(audio_dir: &Path, aws_endpoint: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                aws: AwsConfig {
                    access_key_id: Some(SecretString::from("AKIDTESTKEY")),
                    secret_access_key: Some(SecretString::from("test-secret")),
                    endpoint_url: Some(aws_endpoint.parse().expect("valid URL")),
                    max_attempts: 1,
                    timeout: "5s".to_owned(),
                    ..AwsConfig::default()
                },
                audio: AudioConfig {
                    directory: audio_dir.to_path_buf(),
                    ..AudioConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Announce clips under a fixed public URL
    pub fn with_public_url(mut self, url: &str) -> Self {
        self.config.server.public_url = Some(url.parse().expect("valid URL"));
        self
    }

    /// Set the speech voice
    pub fn with_voice(mut self, voice: &str) -> Self {
        voice.clone_into(&mut self.config.speech.voice);
        self
    }

    /// Set the upload size limit
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.config.server.max_upload_bytes = limit;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
