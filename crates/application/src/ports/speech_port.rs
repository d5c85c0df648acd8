//! Speech synthesis port - Interface for the text-to-speech capability

use async_trait::async_trait;
use domain::{AudioClip, CapabilityResult, VoiceId};
#[cfg(test)]
use mockall::automock;

/// Port for turning text into an audio byte stream
///
/// The contract ends at delivering bytes: persisting or playing the audio is
/// the caller's concern.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// Synthesize `text` with the given voice
    ///
    /// # Errors
    ///
    /// Returns a `CapabilityError` classifying the failure.
    async fn synthesize(&self, text: &str, voice: &VoiceId) -> CapabilityResult<AudioClip>;
}
