use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

/// Storage of synthesized clips
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioConfig {
    /// Directory clips are written to and served from
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// How long a clip is kept (e.g. "1h"); clips are kept forever when unset
    #[serde(default)]
    pub retention: Option<String>,
    /// How often expired clips are swept
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            retention: None,
            sweep_interval: default_sweep_interval(),
        }
    }
}

impl AudioConfig {
    /// Parsed retention period, if any
    ///
    /// # Errors
    ///
    /// Returns an error if `retention` is not a valid duration
    pub fn retention_duration(&self) -> anyhow::Result<Option<Duration>> {
        self.retention
            .as_deref()
            .map(|raw| duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid audio.retention '{raw}': {e}")))
            .transpose()
    }

    /// Parsed sweep interval
    ///
    /// # Errors
    ///
    /// Returns an error if `sweep_interval` is not a valid duration
    pub fn sweep_interval_duration(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.sweep_interval)
            .map_err(|e| anyhow::anyhow!("invalid audio.sweep_interval '{}': {e}", self.sweep_interval))
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("static")
}

fn default_sweep_interval() -> String {
    "5m".to_owned()
}
