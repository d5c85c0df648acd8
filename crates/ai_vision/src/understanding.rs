//! Image understanding adapter
//!
//! Encodes the raw image bytes as base64, sends one multi-part message
//! combining a fixed instruction with the encoded image, and extracts the
//! first textual output segment.

use std::time::Duration;

use application::{ApplicationError, ImageUnderstandingPort};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use domain::{CapabilityError, CapabilityResult};
use provider_http::{ProviderClient, ProviderClientConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::VisionConfig;

/// Instruction sent with every image
const DESCRIBE_INSTRUCTION: &str = "Describe this image in detail.";

/// Image understanding provider backed by an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct ImageUnderstandingClient {
    client: ProviderClient,
    config: VisionConfig,
}

/// Understanding request body
#[derive(Debug, Serialize)]
struct DescribeRequest<'a> {
    model: &'a str,
    messages: Vec<DescribeMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct DescribeMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    InputText { text: &'a str },
    InputImage { image_data: String },
}

/// Understanding response body
#[derive(Debug, Deserialize)]
struct DescribeResponse {
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    text: String,
}

impl ImageUnderstandingClient {
    /// Create a new image understanding client
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

    /// The configured vision model
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.vision_model
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.config.base_url)
    }
}

#[async_trait]
impl ImageUnderstandingPort for ImageUnderstandingClient {
    #[instrument(skip(self, image), fields(image_size = image.len()))]
    async fn describe(&self, image: &[u8]) -> CapabilityResult<String> {
        let request = DescribeRequest {
            model: &self.config.vision_model,
            messages: vec![DescribeMessage {
                role: "user",
                content: vec![
                    ContentPart::InputText {
                        text: DESCRIBE_INSTRUCTION,
                    },
                    ContentPart::InputImage {
                        image_data: BASE64.encode(image),
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(self.responses_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.is_success() {
            return Err(CapabilityError::remote(response.status(), response.text()));
        }

        let described: DescribeResponse = response.json()?;
        let text = described
            .output
            .into_iter()
            .next()
            .and_then(|item| item.content.into_iter().next())
            .map(|content| content.text)
            .ok_or_else(|| {
                CapabilityError::MalformedResponse(
                    "understanding response contained no output text".to_string(),
                )
            })?;

        debug!(description_len = text.len(), "Image described");

        Ok(text)
    }
}
