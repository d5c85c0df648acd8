//! Image generation adapter
//!
//! Sends prompt plus a size from the fixed enumeration; extracts the first
//! result entry's URL. The referenced image is never downloaded here.

use std::time::Duration;

use application::{ApplicationError, GeneratedImage, ImageGenerationPort};
use async_trait::async_trait;
use domain::{CapabilityError, CapabilityResult, ImageSize};
use provider_http::{ProviderClient, ProviderClientConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::VisionConfig;

/// Image generation provider backed by an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct ImageGenerationClient {
    client: ProviderClient,
    config: VisionConfig,
}

/// Generation request body
#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
}

/// Generation response body
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedEntry>,
}

#[derive(Debug, Deserialize)]
struct GeneratedEntry {
    url: String,
}

impl ImageGenerationClient {
    /// Create a new image generation client
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: VisionConfig) -> Result<Self, ApplicationError> {
        config.validate().map_err(ApplicationError::Configuration)?;

        let client = ProviderClient::with_config(
            ProviderClientConfig::default().with_timeout(Duration::from_millis(config.timeout_ms)),
        )
        .map_err(|e| {
            ApplicationError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self { client, config })
    }

    /// The configured image model
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.image_model
    }

    fn generations_url(&self) -> String {
        format!("{}/images/generations", self.config.base_url)
    }
}

#[async_trait]
impl ImageGenerationPort for ImageGenerationClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len(), size = %size))]
    async fn generate(&self, prompt: &str, size: ImageSize) -> CapabilityResult<GeneratedImage> {
        let request = GenerationRequest {
            model: &self.config.image_model,
            prompt,
            size: size.as_str(),
        };

        let response = self
            .client
            .post(self.generations_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.is_success() {
            return Err(CapabilityError::remote(response.status(), response.text()));
        }

        let generation: GenerationResponse = response.json()?;
        let entry = generation.data.into_iter().next().ok_or_else(|| {
            CapabilityError::MalformedResponse("image response contained no entries".to_string())
        })?;

        debug!(url = %entry.url, "Image generated");

        Ok(GeneratedImage { url: entry.url })
    }
}
