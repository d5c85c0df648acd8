//! Capability model
//!
//! The five external capabilities the assistant can exercise, the request
//! shapes they accept and the normalized payloads they return. Providers map
//! their heterogeneous wire formats onto these types so the orchestrator
//! never sees a provider-specific shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::AudioClip;
use crate::value_objects::{ImageSize, VoiceId};

/// The five supported capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    /// Conversation transcript to assistant reply
    TextCompletion,
    /// Text to audio bytes
    SpeechSynthesis,
    /// Captured utterance to text
    SpeechRecognition,
    /// Prompt to image reference
    ImageGeneration,
    /// Image bytes to descriptive text
    ImageUnderstanding,
}

impl CapabilityKind {
    /// Stable snake_case name, used as a log field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextCompletion => "text_completion",
            Self::SpeechSynthesis => "speech_synthesis",
            Self::SpeechRecognition => "speech_recognition",
            Self::ImageGeneration => "image_generation",
            Self::ImageUnderstanding => "image_understanding",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A capability invocation with its minimal payload
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityRequest {
    /// Submit one user turn to the conversation
    TextCompletion {
        /// The user's input text
        text: String,
    },
    /// Synthesize speech for a piece of text
    SpeechSynthesis {
        /// Text to speak
        text: String,
        /// Voice to speak with
        voice: VoiceId,
    },
    /// Capture and transcribe one utterance from the input device
    SpeechRecognition,
    /// Generate an image from a prompt
    ImageGeneration {
        /// Prompt describing the image
        prompt: String,
        /// Requested dimensions
        size: ImageSize,
    },
    /// Describe an uploaded image
    ImageUnderstanding {
        /// Raw image bytes
        image: Vec<u8>,
    },
}

impl CapabilityRequest {
    /// The capability this request targets
    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        match self {
            Self::TextCompletion { .. } => CapabilityKind::TextCompletion,
            Self::SpeechSynthesis { .. } => CapabilityKind::SpeechSynthesis,
            Self::SpeechRecognition => CapabilityKind::SpeechRecognition,
            Self::ImageGeneration { .. } => CapabilityKind::ImageGeneration,
            Self::ImageUnderstanding { .. } => CapabilityKind::ImageUnderstanding,
        }
    }
}

/// Normalized successful payload of a capability call
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityPayload {
    /// Textual result (reply, transcription, description)
    Text(String),
    /// Binary audio result
    Audio(AudioClip),
    /// Reference to a remote resource (image URL)
    Resource(String),
}

impl CapabilityPayload {
    /// The textual content, if this payload is text
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The audio clip, if this payload is audio
    #[must_use]
    pub const fn as_audio(&self) -> Option<&AudioClip> {
        match self {
            Self::Audio(clip) => Some(clip),
            _ => None,
        }
    }

    /// The resource locator, if this payload is a reference
    #[must_use]
    pub fn as_resource(&self) -> Option<&str> {
        match self {
            Self::Resource(url) => Some(url),
            _ => None,
        }
    }
}
