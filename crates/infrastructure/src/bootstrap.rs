//! Composition root - wire a session from configuration

use std::sync::Arc;

use ai_core::OpenAiCompletionClient;
use ai_speech::{
    ElevenLabsSpeechProvider, MicrophoneRecorder, MicrophoneVoiceInput, UtteranceSource,
    WhisperTranscriber,
};
use ai_vision::{ImageGenerationClient, ImageUnderstandingClient};
use application::{ApplicationError, CapabilityProviders, ConversationSession};
use tracing::info;

use crate::config::AssistantConfig;

/// Build a [`ConversationSession`] with the real capability adapters
///
/// The microphone device is opened lazily at capture time, so building a
/// session on a machine without audio hardware succeeds.
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` if any provider configuration
/// is invalid.
pub fn build_session(config: AssistantConfig) -> Result<ConversationSession, ApplicationError> {
    let completion = Arc::new(OpenAiCompletionClient::new(config.language)?);
    let synthesis = Arc::new(ElevenLabsSpeechProvider::new(config.synthesis)?);

    let recorder: Arc<dyn UtteranceSource> = Arc::new(MicrophoneRecorder::new(config.capture)?);
    let transcriber = WhisperTranscriber::new(config.recognition)?;
    let voice_input = Arc::new(MicrophoneVoiceInput::new(recorder, transcriber));

    let image_generation = Arc::new(ImageGenerationClient::new(config.vision.clone())?);
    let image_understanding = Arc::new(ImageUnderstandingClient::new(config.vision)?);

    let providers = CapabilityProviders {
        completion,
        synthesis,
        voice_input,
        image_generation,
        image_understanding,
    };

    let session = ConversationSession::new(providers, config.session);
    info!("Conversation session assembled");

    Ok(session)
}
