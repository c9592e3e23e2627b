use std::sync::Arc;

use announcer_config::AwsConfig;
use announcer_storage::AudioStore;
use face::FaceDetector;
use tts::TtsProvider;
use url::Url;

/// Environment variables the default AWS credential chain reads keys from
const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Shared state handed to every handler
pub struct AppState {
    pub detector: Arc<dyn FaceDetector>,
    pub synthesizer: Arc<dyn TtsProvider>,
    pub store: AudioStore,
    /// Voice the announcement is spoken in
    pub voice: String,
    /// Fixed base for `audioUrl`, overriding the request's own host
    pub public_url: Option<Url>,
    /// Honor `X-Forwarded-Proto`/`X-Forwarded-Host` when building `audioUrl`
    pub trust_forwarded_headers: bool,
    pub credentials: CredentialStatus,
}

/// Whether AWS access keys are available to the SDK clients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialStatus {
    pub access_key_set: bool,
    pub secret_key_set: bool,
}

impl CredentialStatus {
    /// Resolve from the `[aws]` section, falling back to the process environment
    ///
    /// A key counts as set when either source holds a non-blank value.
    pub fn detect(aws: &AwsConfig) -> Self {
        Self {
            access_key_set: aws.has_access_key() || env_is_set(ACCESS_KEY_VAR),
            secret_key_set: aws.has_secret_key() || env_is_set(SECRET_KEY_VAR),
        }
    }
}

fn env_is_set(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| !value.trim().is_empty())
}
