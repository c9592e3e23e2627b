use announcer_config::{SpeechConfig, SpeechEngine};
use async_trait::async_trait;
use aws_sdk_polly::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::synthesize_speech::SynthesizeSpeechError,
    types::{Engine, LanguageCode, OutputFormat, VoiceId},
};

use super::TtsProvider;
use crate::{
    error::TtsError,
    types::{AudioFormat, SpeechRequest, SpeechResponse},
};

/// AWS Polly TTS provider
pub struct PollyProvider {
    name: String,
    client: Client,
    engine: Engine,
    language_code: Option<LanguageCode>,
}

impl PollyProvider {
    pub fn new(name: impl Into<String>, sdk_config: &aws_config::SdkConfig, speech: &SpeechConfig) -> Self {
        let engine = match speech.engine {
            SpeechEngine::Standard => Engine::Standard,
            SpeechEngine::Neural => Engine::Neural,
        };

        Self {
            name: name.into(),
            client: Client::new(sdk_config),
            engine,
            language_code: speech.language_code.as_deref().map(LanguageCode::from),
        }
    }
}

#[async_trait]
impl TtsProvider for PollyProvider {
    async fn synthesize(&self, request: SpeechRequest) -> crate::error::Result<SpeechResponse> {
        if request.input.trim().is_empty() {
            return Err(TtsError::InvalidRequest("text must not be empty".to_owned()));
        }

        tracing::debug!(
            provider = %self.name,
            voice = %request.voice,
            input_len = request.input.len(),
            "polly synthesize_speech request"
        );

        let output_format = match request.format {
            AudioFormat::Mp3 => OutputFormat::Mp3,
        };

        let output = self
            .client
            .synthesize_speech()
            .text(&request.input)
            .voice_id(VoiceId::from(request.voice.as_str()))
            .output_format(output_format)
            .engine(self.engine.clone())
            .set_language_code(self.language_code.clone())
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let audio = output
            .audio_stream
            .collect()
            .await
            .map_err(|e| TtsError::ConnectionError(format!("failed to read audio stream: {e}")))?
            .into_bytes();

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        tracing::debug!(provider = %self.name, bytes = audio.len(), "polly synthesis complete");

        Ok(SpeechResponse { audio: audio.to_vec() })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn classify(err: &SdkError<SynthesizeSpeechError>) -> TtsError {
    let Some(service_err) = err.as_service_error() else {
        return TtsError::ConnectionError(DisplayErrorContext(err).to_string());
    };

    let message = service_err.message().unwrap_or("no message").to_owned();

    if service_err.is_text_length_exceeded_exception()
        || service_err.is_engine_not_supported_exception()
        || service_err.is_language_not_supported_exception()
    {
        return TtsError::InvalidRequest(message);
    }

    TtsError::ProviderApiError {
        code: service_err.code().unwrap_or("Unknown").to_owned(),
        message,
    }
}
