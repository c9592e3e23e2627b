use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_aws()?;
        self.validate_speech()?;
        self.validate_audio()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("server.max_upload_bytes must be greater than 0");
        }

        if let Some(ref url) = self.server.public_url
            && !matches!(url.scheme(), "http" | "https")
        {
            anyhow::bail!("server.public_url must be an http(s) URL, got '{url}'");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_aws(&self) -> anyhow::Result<()> {
        if self.aws.region.trim().is_empty() {
            anyhow::bail!("aws.region must not be empty");
        }

        if self.aws.has_access_key() != self.aws.has_secret_key() {
            anyhow::bail!("aws.access_key_id and aws.secret_access_key must be set together");
        }

        if self.aws.max_attempts == 0 {
            anyhow::bail!("aws.max_attempts must be at least 1");
        }

        if self.aws.timeout_duration()?.is_zero() {
            anyhow::bail!("aws.timeout must be greater than 0");
        }

        Ok(())
    }

    fn validate_speech(&self) -> anyhow::Result<()> {
        if self.speech.voice.trim().is_empty() {
            anyhow::bail!("speech.voice must not be empty");
        }

        Ok(())
    }

    fn validate_audio(&self) -> anyhow::Result<()> {
        if self.audio.directory.as_os_str().is_empty() {
            anyhow::bail!("audio.directory must not be empty");
        }

        if self.audio.sweep_interval_duration()?.is_zero() {
            anyhow::bail!("audio.sweep_interval must be greater than 0");
        }

        if let Some(retention) = self.audio.retention_duration()?
            && retention.is_zero()
        {
            anyhow::bail!("audio.retention must be greater than 0 when set");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let Some(rate) = self
            .telemetry
            .as_ref()
            .and_then(|t| t.tracing.as_ref())
            .map(|t| t.sampling_rate)
        else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0.0 and 1.0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::ExposeSecret;

    use crate::{AnyOrArray, Config, LogFormat, SpeechEngine};

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.aws.region, "eu-central-1");
        assert_eq!(config.speech.voice, "Joanna");
        assert_eq!(config.speech.engine, SpeechEngine::Standard);
        assert_eq!(config.audio.directory.to_str(), Some("static"));
        assert_eq!(config.server.max_upload_bytes, 5 << 20);
        assert_eq!(config.server.cors.origins, AnyOrArray::Any);
        assert!(config.server.health.enabled);
        assert!(!config.server.trust_forwarded_headers);
        assert!(config.telemetry.is_none());
    }

    #[test]
    fn full_file() {
        let raw = r#"
            [server]
            listen_address = "127.0.0.1:5000"
            public_url = "https://announcer.example.com"
            trust_forwarded_headers = true

            [server.cors]
            origins = ["http://localhost:3000"]

            [aws]
            region = "us-east-1"
            access_key_id = "AKIA"
            secret_access_key = "secret"
            timeout = "10s"

            [speech]
            voice = "Matthew"
            engine = "neural"

            [audio]
            directory = "/var/lib/announcer"
            retention = "1h"
            sweep_interval = "1m"

            [telemetry]
            log_format = "json"
        "#;

        let config = Config::parse(raw).unwrap();

        assert_eq!(config.server.listen_address.unwrap().port(), 5000);
        assert!(config.server.trust_forwarded_headers);
        assert_eq!(config.aws.region, "us-east-1");
        assert_eq!(config.aws.timeout_duration().unwrap(), Duration::from_secs(10));
        assert_eq!(
            config.aws.access_key_id.as_ref().map(|k| k.expose_secret().to_owned()),
            Some("AKIA".to_owned())
        );
        assert_eq!(config.speech.engine, SpeechEngine::Neural);
        assert_eq!(config.audio.retention_duration().unwrap(), Some(Duration::from_secs(3600)));
        assert_eq!(config.audio.sweep_interval_duration().unwrap(), Duration::from_secs(60));
        assert_eq!(config.telemetry.unwrap().log_format, LogFormat::Json);
    }

    #[test]
    fn credentials_from_environment() {
        let vars = [("ANNOUNCER_CFG_KEY", Some("AKIA")), ("ANNOUNCER_CFG_SECRET", Some("secret"))];
        temp_env::with_vars(vars, || {
            let raw = "[aws]\naccess_key_id = \"{{ env.ANNOUNCER_CFG_KEY }}\"\nsecret_access_key = \"{{ env.ANNOUNCER_CFG_SECRET }}\"";
            let config = Config::parse(raw).unwrap();
            assert!(config.aws.static_credentials().is_some());
        });
    }

    #[test]
    fn unknown_field_rejected() {
        let err = Config::parse("[speech]\nvoice_id = \"Joanna\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn half_credentials_rejected() {
        let err = Config::parse("[aws]\naccess_key_id = \"AKIA\"").unwrap_err();
        assert!(err.to_string().contains("must be set together"));
    }

    #[test]
    fn invalid_duration_rejected() {
        let err = Config::parse("[audio]\nretention = \"soon\"").unwrap_err();
        assert!(err.to_string().contains("audio.retention"));
    }

    #[test]
    fn non_http_public_url_rejected() {
        let err = Config::parse("[server]\npublic_url = \"ftp://example.com\"").unwrap_err();
        assert!(err.to_string().contains("public_url"));
    }

    #[test]
    fn sampling_rate_out_of_range_rejected() {
        let err = Config::parse("[telemetry.tracing]\nsampling_rate = 1.5").unwrap_err();
        assert!(err.to_string().contains("sampling_rate"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("announcer.toml");
        std::fs::write(&path, "[speech]\nvoice = \"Amy\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.speech.voice, "Amy");
    }

    #[test]
    fn load_missing_file() {
        let err = Config::load(std::path::Path::new("/nonexistent/announcer.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn sample_config_is_valid() {
        let config = temp_env::with_var_unset("AWS_REGION", || {
            Config::parse(include_str!("../../../announcer.toml")).unwrap()
        });

        assert_eq!(config.aws.region, "eu-central-1");
        assert_eq!(config.server.listen_address, Some("0.0.0.0:5000".parse().unwrap()));
        assert_eq!(config.audio.retention_duration().unwrap(), Some(Duration::from_secs(3600)));
        assert!(!config.aws.has_access_key());
    }
}
