/// Encoded audio formats the announcer can request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AudioFormat {
    #[default]
    Mp3,
}

impl AudioFormat {
    /// MIME type of the encoded audio
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }

    /// File extension without the leading dot
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }
}

/// Text to speak and how to voice it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    /// Text to synthesize
    pub input: String,
    /// Provider voice identifier (e.g. "Joanna")
    pub voice: String,
    /// Output encoding
    pub format: AudioFormat,
}

/// Raw audio returned by a TTS provider
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// Encoded audio bytes
    pub audio: Vec<u8>,
}
