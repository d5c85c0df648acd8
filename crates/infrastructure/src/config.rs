//! Assistant configuration
//!
//! Aggregates the per-crate provider configurations. Values come from an
//! optional `config/ari.toml` file plus `ARI__`-prefixed environment
//! overrides; the two provider secrets come from the process environment at
//! startup. Secret absence is deliberately not validated before first use:
//! calls with an empty key fail with the remote side's authorization error.

use std::path::PathBuf;

use ai_core::LanguageConfig;
use ai_speech::{CaptureConfig, RecognitionConfig, SynthesisConfig};
use ai_vision::VisionConfig;
use application::SessionConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable holding the text/image/vision provider key
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the speech provider key
pub const ELEVENLABS_API_KEY_VAR: &str = "ELEVENLABS_API_KEY";

/// Aggregate configuration for the assistant core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Text completion endpoint
    #[serde(default)]
    pub language: LanguageConfig,

    /// Speech synthesis endpoint
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Speech recognition endpoint
    #[serde(default)]
    pub recognition: RecognitionConfig,

    /// Microphone capture parameters
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Image generation and understanding endpoints
    #[serde(default)]
    pub vision: VisionConfig,

    /// Session persona and default voice
    #[serde(default)]
    pub session: SessionConfig,

    /// Fixed local path for the latest synthesized audio artifact
    #[serde(default = "default_audio_artifact_path")]
    pub audio_artifact_path: PathBuf,
}

fn default_audio_artifact_path() -> PathBuf {
    PathBuf::from("ari_voice.mp3")
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            language: LanguageConfig::default(),
            synthesis: SynthesisConfig::default(),
            recognition: RecognitionConfig::default(),
            capture: CaptureConfig::default(),
            vision: VisionConfig::default(),
            session: SessionConfig::default(),
            audio_artifact_path: default_audio_artifact_path(),
        }
    }
}

impl AssistantConfig {
    /// Load configuration from file, environment overrides and env secrets
    ///
    /// # Errors
    ///
    /// Returns a `config::ConfigError` if the sources cannot be read or
    /// deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/ari").required(false))
            .add_source(
                config::Environment::with_prefix("ARI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: Self = settings.try_deserialize()?;
        loaded.apply_env_secrets();

        debug!("Assistant configuration loaded");
        Ok(loaded)
    }

    /// Defaults plus the env secrets, no file involved
    #[must_use]
    pub fn from_env() -> Self {
        let mut loaded = Self::default();
        loaded.apply_env_secrets();
        loaded
    }

    /// Read the two provider secrets from the process environment
    pub fn apply_env_secrets(&mut self) {
        self.overlay_secrets(
            std::env::var(OPENAI_API_KEY_VAR).ok(),
            std::env::var(ELEVENLABS_API_KEY_VAR).ok(),
        );
    }

    /// Distribute the provider secrets over the capability configs
    ///
    /// The text/vision key also covers recognition; synthesis has its own.
    pub fn overlay_secrets(&mut self, openai_key: Option<String>, elevenlabs_key: Option<String>) {
        if let Some(key) = openai_key {
            self.language.api_key.clone_from(&key);
            self.recognition.api_key.clone_from(&key);
            self.vision.api_key = key;
        }
        if let Some(key) = elevenlabs_key {
            self.synthesis.api_key = key;
        }
    }

    /// Validate the structural fields of every capability config
    ///
    /// Secrets are not checked here.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, prefixed with its section.
    pub fn validate(&self) -> Result<(), String> {
        self.language
            .validate()
            .map_err(|e| format!("language: {e}"))?;
        self.synthesis
            .validate()
            .map_err(|e| format!("synthesis: {e}"))?;
        self.recognition
            .validate()
            .map_err(|e| format!("recognition: {e}"))?;
        self.capture.validate().map_err(|e| format!("capture: {e}"))?;
        self.vision.validate().map_err(|e| format!("vision: {e}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AssistantConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.audio_artifact_path, PathBuf::from("ari_voice.mp3"));
    }

    #[test]
    fn overlay_secrets_distributes_openai_key() {
        let mut config = AssistantConfig::default();
        config.overlay_secrets(Some("sk-test".to_string()), None);

        assert_eq!(config.language.api_key, "sk-test");
        assert_eq!(config.recognition.api_key, "sk-test");
        assert_eq!(config.vision.api_key, "sk-test");
        assert!(config.synthesis.api_key.is_empty());
    }

    #[test]
    fn overlay_secrets_sets_speech_key() {
        let mut config = AssistantConfig::default();
        config.overlay_secrets(None, Some("el-test".to_string()));

        assert_eq!(config.synthesis.api_key, "el-test");
        assert!(config.language.api_key.is_empty());
    }

    #[test]
    fn overlay_secrets_without_keys_changes_nothing() {
        let mut config = AssistantConfig::default();
        config.overlay_secrets(None, None);

        assert!(config.language.api_key.is_empty());
        assert!(config.synthesis.api_key.is_empty());
    }

    #[test]
    fn validate_reports_failing_section() {
        let mut config = AssistantConfig::default();
        config.capture.trailing_silence_ms = 0;

        let err = config.validate().unwrap_err();
        assert!(err.starts_with("capture:"));
    }

    #[test]
    fn config_deserializes_from_toml_sections() {
        let toml = r#"
            audio_artifact_path = "/tmp/ari_voice.mp3"

            [language]
            model = "gpt-4o"

            [synthesis]
            model = "eleven_turbo_v2"

            [session]
            persona = "You are a terse assistant."
        "#;

        let config: AssistantConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.language.model, "gpt-4o");
        assert_eq!(config.synthesis.model, "eleven_turbo_v2");
        assert_eq!(config.session.persona, "You are a terse assistant.");
        assert_eq!(config.audio_artifact_path, PathBuf::from("/tmp/ari_voice.mp3"));
        // untouched sections keep their defaults
        assert_eq!(config.recognition.model, "whisper-1");
    }
}
