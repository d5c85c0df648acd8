//! ElevenLabs speech synthesis provider
//!
//! Sends text plus a model id to the text-to-speech endpoint; the voice id
//! travels as a path parameter and the key in the `xi-api-key` header. On
//! success the raw response bytes are the payload, undecoded.

use std::time::Duration;

use application::{ApplicationError, SpeechSynthesisPort};
use async_trait::async_trait;
use domain::{AudioClip, AudioFormat, CapabilityError, CapabilityResult, VoiceId};
use provider_http::{ProviderClient, ProviderClientConfig};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::SynthesisConfig;

/// Speech synthesis provider backed by an ElevenLabs-style endpoint
#[derive(Debug, Clone)]
pub struct ElevenLabsSpeechProvider {
    client: ProviderClient,
    config: SynthesisConfig,
}

/// Synthesis request body
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabsSpeechProvider {
    /// Create a new synthesis provider
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: SynthesisConfig) -> Result<Self, ApplicationError> {
        config.validate().map_err(ApplicationError::Configuration)?;

        let client = ProviderClient::with_config(
            ProviderClientConfig::default().with_timeout(Duration::from_millis(config.timeout_ms)),
        )
        .map_err(|e| {
            ApplicationError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self { client, config })
    }

    /// The configured synthesis model
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn synthesis_url(&self, voice: &VoiceId) -> String {
        format!("{}/text-to-speech/{}", self.config.base_url, voice.as_str())
    }
}

#[async_trait]
impl SpeechSynthesisPort for ElevenLabsSpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice))]
    async fn synthesize(&self, text: &str, voice: &VoiceId) -> CapabilityResult<AudioClip> {
        let request = SynthesisRequest {
            text,
            model_id: &self.config.model,
        };

        let response = self
            .client
            .post(self.synthesis_url(voice))
            .header("xi-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.is_success() {
            // the body is not guaranteed to be human-readable here
            return Err(CapabilityError::remote(response.status(), response.text()));
        }

        let audio = response.into_body();
        debug!(audio_size = audio.len(), "Speech synthesis complete");

        Ok(AudioClip::new(audio.to_vec(), AudioFormat::Mp3))
    }
}
