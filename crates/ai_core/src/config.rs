//! Configuration for the text completion provider

use serde::{Deserialize, Serialize};

/// Configuration for the OpenAI-compatible completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// API key for the text/vision provider
    ///
    /// An empty key is sent as-is and rejected by the remote side; absence
    /// is not validated locally.
    #[serde(default)]
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl LanguageConfig {
    /// Validate the structural configuration fields
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL must not be empty".to_string());
        }
        if self.model.is_empty() {
            return Err("Model must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}
