use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// AWS client configuration shared by the face-detection and speech clients
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsConfig {
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID (the default credential chain is used when absent or empty)
    #[serde(default)]
    pub access_key_id: Option<SecretString>,
    /// Secret access key
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    /// Endpoint override, e.g. a LocalStack instance
    #[serde(default)]
    pub endpoint_url: Option<Url>,
    /// Per-operation timeout (e.g. "30s")
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Attempts per operation, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            access_key_id: None,
            secret_access_key: None,
            endpoint_url: None,
            timeout: default_timeout(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl AwsConfig {
    /// Whether a non-empty access key ID is configured
    pub fn has_access_key(&self) -> bool {
        non_empty(self.access_key_id.as_ref()).is_some()
    }

    /// Whether a non-empty secret access key is configured
    pub fn has_secret_key(&self) -> bool {
        non_empty(self.secret_access_key.as_ref()).is_some()
    }

    /// Explicit key pair, only when both halves are present
    pub fn static_credentials(&self) -> Option<(&SecretString, &SecretString)> {
        non_empty(self.access_key_id.as_ref()).zip(non_empty(self.secret_access_key.as_ref()))
    }

    /// Parsed operation timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `timeout` is not a valid duration
    pub fn timeout_duration(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.timeout).map_err(|e| anyhow::anyhow!("invalid aws.timeout '{}': {e}", self.timeout))
    }
}

fn non_empty(secret: Option<&SecretString>) -> Option<&SecretString> {
    secret.filter(|s| !s.expose_secret().trim().is_empty())
}

fn default_region() -> String {
    "eu-central-1".to_owned()
}

fn default_timeout() -> String {
    "30s".to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_attempts() -> u32 {
    3
}
