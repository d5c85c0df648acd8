//! Voice input port - Interface for the speech recognition capability

use async_trait::async_trait;
use domain::CapabilityResult;
#[cfg(test)]
use mockall::automock;

/// Port for capturing one utterance from the input device and transcribing it
///
/// The call blocks until the speaker falls silent or the capture window
/// elapses. Failures are real failures: no fallback phrase is substituted at
/// this level, the presentation layer decides what to show.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VoiceInputPort: Send + Sync {
    /// Capture and transcribe a single utterance
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError::Device` for capture problems (no device, no
    /// speech) and the usual remote classifications for transcription.
    async fn capture_utterance(&self) -> CapabilityResult<String>;
}
