use serde::Deserialize;

/// Voice used to announce the detected emotion
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    /// Polly voice ID
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Synthesis engine
    #[serde(default)]
    pub engine: SpeechEngine,
    /// Optional BCP-47 language code for bilingual voices
    #[serde(default)]
    pub language_code: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            engine: SpeechEngine::default(),
            language_code: None,
        }
    }
}

/// Polly synthesis engines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechEngine {
    #[default]
    Standard,
    Neural,
}

fn default_voice() -> String {
    "Joanna".to_owned()
}
