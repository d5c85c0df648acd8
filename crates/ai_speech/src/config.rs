//! Configuration for the speech providers

use serde::{Deserialize, Serialize};

/// Configuration for the ElevenLabs-style synthesis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// API key for the speech provider
    ///
    /// An empty key is sent as-is and rejected by the remote side; absence
    /// is not validated locally.
    #[serde(default)]
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_synthesis_base_url")]
    pub base_url: String,

    /// Synthesis model identifier
    #[serde(default = "default_synthesis_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_synthesis_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_synthesis_model() -> String {
    "eleven_multilingual_v2".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_synthesis_base_url(),
            model: default_synthesis_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SynthesisConfig {
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

/// Configuration for the Whisper-style transcription endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// API key for the text/vision provider (shared with completion)
    #[serde(default)]
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_recognition_base_url")]
    pub base_url: String,

    /// Transcription model identifier
    #[serde(default = "default_recognition_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_recognition_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_recognition_model() -> String {
    "whisper-1".to_string()
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_recognition_base_url(),
            model: default_recognition_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RecognitionConfig {
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

/// Configuration for microphone capture and utterance endpointing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// RMS level (full scale 1.0) above which a frame counts as speech
    #[serde(default = "default_silence_threshold")]
    pub silence_threshold: f32,

    /// Trailing silence that ends an utterance, in milliseconds
    #[serde(default = "default_trailing_silence_ms")]
    pub trailing_silence_ms: u64,

    /// Hard cap on utterance length, in milliseconds
    #[serde(default = "default_max_utterance_ms")]
    pub max_utterance_ms: u64,

    /// How long to wait for speech to start, in milliseconds
    #[serde(default = "default_max_wait_for_speech_ms")]
    pub max_wait_for_speech_ms: u64,
}

const fn default_silence_threshold() -> f32 {
    0.015
}

const fn default_trailing_silence_ms() -> u64 {
    900
}

const fn default_max_utterance_ms() -> u64 {
    30_000
}

const fn default_max_wait_for_speech_ms() -> u64 {
    10_000
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            silence_threshold: default_silence_threshold(),
            trailing_silence_ms: default_trailing_silence_ms(),
            max_utterance_ms: default_max_utterance_ms(),
            max_wait_for_speech_ms: default_max_wait_for_speech_ms(),
        }
    }
}

impl CaptureConfig {
    /// Validate the capture parameters
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..1.0).contains(&self.silence_threshold) || self.silence_threshold <= 0.0 {
            return Err(format!(
                "Silence threshold must be between 0 and 1, got {}",
                self.silence_threshold
            ));
        }
        if self.trailing_silence_ms == 0 {
            return Err("Trailing silence must be greater than 0".to_string());
        }
        if self.max_utterance_ms == 0 {
            return Err("Max utterance length must be greater than 0".to_string());
        }
        if self.max_wait_for_speech_ms == 0 {
            return Err("Max wait for speech must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_defaults() {
        let config = SynthesisConfig::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.base_url, "https://api.elevenlabs.io/v1");
        assert_eq!(config.model, "eleven_multilingual_v2");
        assert_eq!(config.timeout_ms, 30_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn recognition_defaults() {
        let config = RecognitionConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "whisper-1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn capture_defaults() {
        let config = CaptureConfig::default();
        assert!((config.silence_threshold - 0.015).abs() < f32::EPSILON);
        assert_eq!(config.trailing_silence_ms, 900);
        assert_eq!(config.max_utterance_ms, 30_000);
        assert_eq!(config.max_wait_for_speech_ms, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn synthesis_validate_rejects_empty_model() {
        let config = SynthesisConfig {
            model: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn recognition_validate_rejects_zero_timeout() {
        let config = RecognitionConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn capture_validate_rejects_threshold_out_of_range() {
        let mut config = CaptureConfig {
            silence_threshold: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.silence_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn capture_validate_rejects_zero_durations() {
        let config = CaptureConfig {
            trailing_silence_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn synthesis_config_deserializes_from_toml() {
        let toml = r#"
            api_key = "el-test"
            model = "eleven_turbo_v2"
            timeout_ms = 15000
        "#;

        let config: SynthesisConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.api_key, "el-test");
        assert_eq!(config.model, "eleven_turbo_v2");
        assert_eq!(config.timeout_ms, 15_000);
        // defaults fill the rest
        assert_eq!(config.base_url, "https://api.elevenlabs.io/v1");
    }
}
