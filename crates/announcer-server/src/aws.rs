use announcer_config::AwsConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig, retry::RetryConfig, timeout::TimeoutConfig};
use secrecy::ExposeSecret;

/// Build the SDK configuration shared by the Rekognition and Polly clients
///
/// Explicit keys from the config file take precedence; otherwise the default
/// AWS credential chain (environment, profile, instance metadata) applies.
pub async fn load_sdk_config(config: &AwsConfig) -> anyhow::Result<SdkConfig> {
    let operation_timeout = config.timeout_duration()?;

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .timeout_config(TimeoutConfig::builder().operation_timeout(operation_timeout).build())
        .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts));

    if let Some((access_key, secret_key)) = config.static_credentials() {
        let credentials = aws_credential_types::Credentials::new(
            access_key.expose_secret(),
            secret_key.expose_secret(),
            None, // session token
            None, // expiry
            "announcer-config",
        );
        loader = loader.credentials_provider(credentials);
    } else {
        tracing::debug!("no static AWS credentials configured, using default credential chain");
    }

    if let Some(ref endpoint) = config.endpoint_url {
        tracing::info!(endpoint = %endpoint, "overriding AWS endpoint");
        loader = loader.endpoint_url(endpoint.as_str().trim_end_matches('/'));
    }

    Ok(loader.load().await)
}
