//! Whisper-style transcription client
//!
//! One multipart request per utterance: the audio file plus the model name.
//! The response's `text` field is the transcription.

use std::time::Duration;

use application::ApplicationError;
use domain::{AudioClip, CapabilityError, CapabilityResult};
use provider_http::{ProviderClient, ProviderClientConfig};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::RecognitionConfig;

/// Transcription client for a Whisper-style endpoint
#[derive(Debug, Clone)]
pub struct WhisperTranscriber {
    client: ProviderClient,
    config: RecognitionConfig,
}

/// Transcription response body
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl WhisperTranscriber {
    /// Create a new transcription client
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: RecognitionConfig) -> Result<Self, ApplicationError> {
        config.validate().map_err(ApplicationError::Configuration)?;

        let client = ProviderClient::with_config(
            ProviderClientConfig::default().with_timeout(Duration::from_millis(config.timeout_ms)),
        )
        .map_err(|e| {
            ApplicationError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self { client, config })
    }

    /// The configured transcription model
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn transcriptions_url(&self) -> String {
        format!("{}/audio/transcriptions", self.config.base_url)
    }

    /// Transcribe one recorded utterance
    ///
    /// # Errors
    ///
    /// Returns the classified capability failure.
    #[instrument(skip(self, clip), fields(audio_size = clip.size_bytes(), format = ?clip.format()))]
    pub async fn transcribe(&self, clip: &AudioClip) -> CapabilityResult<String> {
        if clip.is_empty() {
            return Err(CapabilityError::Device(
                "captured audio was empty".to_string(),
            ));
        }

        let file_part = Part::bytes(clip.data().to_vec())
            .file_name(clip.filename("utterance"))
            .mime_str(clip.mime_type())
            .map_err(|e| CapabilityError::Network(format!("failed to encode audio part: {e}")))?;

        let form = Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone());

        let response = self
            .client
            .post(self.transcriptions_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.is_success() {
            return Err(CapabilityError::remote(response.status(), response.text()));
        }

        let parsed: TranscriptionResponse = response.json()?;
        debug!(text_len = parsed.text.len(), "Transcription complete");

        Ok(parsed.text)
    }
}
