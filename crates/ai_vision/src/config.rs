//! Configuration for the vision providers

use serde::{Deserialize, Serialize};

/// Configuration for the image generation and understanding endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// API key for the text/vision provider (shared with completion)
    ///
    /// An empty key is sent as-is and rejected by the remote side; absence
    /// is not validated locally.
    #[serde(default)]
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Image generation model identifier
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Vision (image understanding) model identifier
    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_image_model() -> String {
    "gpt-image-1".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_timeout_ms() -> u64 {
    60_000
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_model: default_image_model(),
            vision_model: default_vision_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl VisionConfig {
    /// Validate the structural configuration fields
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL must not be empty".to_string());
        }
        if self.image_model.is_empty() {
            return Err("Image model must not be empty".to_string());
        }
        if self.vision_model.is_empty() {
            return Err("Vision model must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}
