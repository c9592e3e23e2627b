use std::net::SocketAddr;

use serde::Deserialize;
use url::Url;

use crate::{cors::CorsConfig, health::HealthConfig};

/// Rekognition rejects inline image bytes above 5 MiB
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Externally visible base URL used when building `audioUrl`
    ///
    /// When absent the base is derived from the request's `Host` header.
    #[serde(default)]
    pub public_url: Option<Url>,
    /// Derive the `audioUrl` base from `X-Forwarded-Proto`/`X-Forwarded-Host`
    ///
    /// Only enable behind a reverse proxy that overwrites these headers;
    /// otherwise any client can point `audioUrl` at another host.
    #[serde(default)]
    pub trust_forwarded_headers: bool,
    /// Largest accepted `/analyze` request body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            public_url: None,
            trust_forwarded_headers: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            health: HealthConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}
