//! Voice input adapter - capture one utterance, then transcribe it

use std::fmt;
use std::sync::Arc;

use application::VoiceInputPort;
use async_trait::async_trait;
use domain::{CapabilityError, CapabilityResult};
use tracing::{debug, instrument};

use crate::capture::UtteranceSource;
use crate::providers::whisper::WhisperTranscriber;

/// `VoiceInputPort` implementation composing a recorder and a transcriber
///
/// The recorder blocks its thread for the length of the utterance, so it
/// runs on a blocking task; the awaiting caller still waits for the result.
pub struct MicrophoneVoiceInput {
    source: Arc<dyn UtteranceSource>,
    transcriber: WhisperTranscriber,
}

impl fmt::Debug for MicrophoneVoiceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicrophoneVoiceInput")
            .field("transcriber", &self.transcriber)
            .finish_non_exhaustive()
    }
}

impl MicrophoneVoiceInput {
    /// Create a new voice input adapter
    pub fn new(source: Arc<dyn UtteranceSource>, transcriber: WhisperTranscriber) -> Self {
        Self {
            source,
            transcriber,
        }
    }
}

#[async_trait]
impl VoiceInputPort for MicrophoneVoiceInput {
    #[instrument(skip(self))]
    async fn capture_utterance(&self) -> CapabilityResult<String> {
        let source = Arc::clone(&self.source);
        let clip = tokio::task::spawn_blocking(move || source.record_utterance())
            .await
            .map_err(|e| CapabilityError::Device(format!("capture task failed: {e}")))??;

        debug!(audio_size = clip.size_bytes(), "Utterance recorded");

        self.transcriber.transcribe(&clip).await
    }
}
