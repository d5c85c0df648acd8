//! Voice identifier for speech synthesis

use std::fmt;

use serde::{Deserialize, Serialize};

/// Voice id the product ships with when none is configured
pub const DEFAULT_VOICE_ID: &str = "EXAVITQu4vr4xnSDxMaL";

/// Opaque identifier of a synthesis voice
///
/// The value is provider-assigned and used verbatim as a path segment of the
/// synthesis endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceId(String);

impl VoiceId {
    /// Create a voice id from a provider-assigned string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VoiceId {
    fn default() -> Self {
        Self(DEFAULT_VOICE_ID.to_string())
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VoiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_raw_value() {
        let voice = VoiceId::new("abc123");
        assert_eq!(voice.as_str(), "abc123");
        assert_eq!(voice.to_string(), "abc123");
    }

    #[test]
    fn default_is_shipped_voice() {
        assert_eq!(VoiceId::default().as_str(), DEFAULT_VOICE_ID);
    }

    #[test]
    fn serde_is_transparent() {
        let voice = VoiceId::new("abc123");
        let json = serde_json::to_string(&voice).unwrap();
        assert_eq!(json, "\"abc123\"");
        let parsed: VoiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, voice);
    }
}
