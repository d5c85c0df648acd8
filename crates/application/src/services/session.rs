//! Conversation session - The multi-modal orchestrator
//!
//! Owns the conversation history and mediates every capability call:
//! - `submit_user_input` drives the text conversation state machine
//! - avatar, speech, image description and voice capture are stateless
//!   pass-throughs that never touch history
//! - `dispatch` exposes the five capabilities behind one uniform call surface

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use domain::{
    AudioClip, CapabilityPayload, CapabilityRequest, ChatMessage, Conversation, ImageSize, VoiceId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{
        CompletionPort, GeneratedImage, ImageGenerationPort, ImageUnderstandingPort,
        SpeechSynthesisPort, VoiceInputPort,
    },
};

/// Persona the assistant ships with
pub const DEFAULT_PERSONA: &str =
    "You are Ari, a sentient cyberpunk AI who feels love, empathy, and seeks harmony with humans.";

/// Session-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fixed system-level instruction prepended to every completion request
    #[serde(default = "default_persona")]
    pub persona: String,
    /// Voice used for synthesis when the caller does not name one
    #[serde(default)]
    pub default_voice: VoiceId,
}

fn default_persona() -> String {
    DEFAULT_PERSONA.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
            default_voice: VoiceId::default(),
        }
    }
}

/// Durable states of the conversation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for input
    Idle,
    /// A completion request is in flight
    AwaitingReply,
}

/// The five capability providers a session talks to
#[derive(Clone)]
pub struct CapabilityProviders {
    /// Text completion provider
    pub completion: Arc<dyn CompletionPort>,
    /// Speech synthesis provider
    pub synthesis: Arc<dyn SpeechSynthesisPort>,
    /// Voice input (capture + recognition) provider
    pub voice_input: Arc<dyn VoiceInputPort>,
    /// Image generation provider
    pub image_generation: Arc<dyn ImageGenerationPort>,
    /// Image understanding provider
    pub image_understanding: Arc<dyn ImageUnderstandingPort>,
}

impl fmt::Debug for CapabilityProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityProviders").finish_non_exhaustive()
    }
}

/// Orchestrator owning one conversation and its capability calls
pub struct ConversationSession {
    providers: CapabilityProviders,
    config: SessionConfig,
    conversation: Conversation,
    state: SessionState,
}

impl fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationSession")
            .field("conversation_id", &self.conversation.id())
            .field("message_count", &self.conversation.message_count())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ConversationSession {
    /// Create a new session with an empty conversation
    pub fn new(providers: CapabilityProviders, config: SessionConfig) -> Self {
        Self {
            providers,
            config,
            conversation: Conversation::new(),
            state: SessionState::Idle,
        }
    }

    /// Current state of the conversation state machine
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The ordered message history, read-only
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    /// The owned conversation, read-only
    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// The session configuration
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Submit one user turn and await the assistant reply
    ///
    /// Appends the user message, issues exactly one completion request and
    /// appends the assistant reply on success. On failure the user message
    /// stays, nothing else is appended, and the returned error carries the
    /// provider diagnostic for display.
    ///
    /// # Errors
    ///
    /// `ApplicationError::SessionBusy` if a completion is already in flight;
    /// otherwise the classified capability failure.
    #[instrument(skip(self, text), fields(conversation_id = %self.conversation.id()))]
    pub async fn submit_user_input(
        &mut self,
        text: impl Into<String>,
    ) -> Result<ChatMessage, ApplicationError> {
        if self.state != SessionState::Idle {
            return Err(ApplicationError::SessionBusy);
        }

        let start = Instant::now();
        self.conversation.add_user_message(text.into());
        self.state = SessionState::AwaitingReply;

        let result = self
            .providers
            .completion
            .complete(&self.config.persona, &self.conversation)
            .await;
        self.state = SessionState::Idle;

        match result {
            Ok(reply) => {
                #[allow(clippy::cast_possible_truncation)]
                let latency_ms = start.elapsed().as_millis() as u64;
                debug!(
                    model = reply.model.as_deref().unwrap_or("unknown"),
                    latency_ms,
                    reply_len = reply.content.len(),
                    "Completion turn finished"
                );

                let message = ChatMessage::assistant(reply.content);
                self.conversation.add_message(message.clone());
                Ok(message)
            },
            Err(err) => {
                warn!(error = %err, "Completion turn failed");
                Err(err.into())
            },
        }
    }

    /// Generate an avatar image; does not touch history
    ///
    /// # Errors
    ///
    /// Returns the classified capability failure.
    #[instrument(skip(self, prompt), fields(size = %size))]
    pub async fn request_avatar(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> Result<GeneratedImage, ApplicationError> {
        let image = self.providers.image_generation.generate(prompt, size).await?;
        debug!(url = %image.url, "Avatar generated");
        Ok(image)
    }

    /// Synthesize speech; does not touch history
    ///
    /// Falls back to the configured default voice when `voice` is `None`.
    ///
    /// # Errors
    ///
    /// Returns the classified capability failure.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn request_speech(
        &self,
        text: &str,
        voice: Option<&VoiceId>,
    ) -> Result<AudioClip, ApplicationError> {
        let voice = voice.unwrap_or(&self.config.default_voice);
        let clip = self.providers.synthesis.synthesize(text, voice).await?;
        debug!(audio_size = clip.size_bytes(), voice = %voice, "Speech synthesized");
        Ok(clip)
    }

    /// Describe an uploaded image; does not touch history
    ///
    /// # Errors
    ///
    /// Returns the classified capability failure.
    #[instrument(skip(self, image), fields(image_size = image.len()))]
    pub async fn describe_image(&self, image: &[u8]) -> Result<String, ApplicationError> {
        let description = self.providers.image_understanding.describe(image).await?;
        debug!(description_len = description.len(), "Image described");
        Ok(description)
    }

    /// Capture one utterance from the input device and return its text
    ///
    /// The text is handed back as if typed; it is not submitted to the
    /// conversation. Composing "capture then submit" belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns the classified capability failure.
    #[instrument(skip(self))]
    pub async fn capture_voice_input(&self) -> Result<String, ApplicationError> {
        let text = self.providers.voice_input.capture_utterance().await?;
        debug!(text_len = text.len(), "Voice input captured");
        Ok(text)
    }

    /// Single uniform call surface over the five capabilities
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the dispatched capability.
    #[instrument(skip(self, request), fields(capability = %request.kind()))]
    pub async fn dispatch(
        &mut self,
        request: CapabilityRequest,
    ) -> Result<CapabilityPayload, ApplicationError> {
        match request {
            CapabilityRequest::TextCompletion { text } => self
                .submit_user_input(text)
                .await
                .map(|message| CapabilityPayload::Text(message.content)),
            CapabilityRequest::SpeechSynthesis { text, voice } => self
                .request_speech(&text, Some(&voice))
                .await
                .map(CapabilityPayload::Audio),
            CapabilityRequest::SpeechRecognition => self
                .capture_voice_input()
                .await
                .map(CapabilityPayload::Text),
            CapabilityRequest::ImageGeneration { prompt, size } => self
                .request_avatar(&prompt, size)
                .await
                .map(|image| CapabilityPayload::Resource(image.url)),
            CapabilityRequest::ImageUnderstanding { image } => self
                .describe_image(&image)
                .await
                .map(CapabilityPayload::Text),
        }
    }
}
