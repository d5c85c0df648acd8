//! Port definitions - Interfaces the capability adapters implement

mod completion_port;
mod speech_port;
mod vision_port;
mod voice_input_port;

pub use completion_port::{CompletionPort, CompletionReply};
pub use speech_port::SpeechSynthesisPort;
pub use vision_port::{GeneratedImage, ImageGenerationPort, ImageUnderstandingPort};
pub use voice_input_port::VoiceInputPort;

#[cfg(test)]
pub use completion_port::MockCompletionPort;
#[cfg(test)]
pub use speech_port::MockSpeechSynthesisPort;
#[cfg(test)]
pub use vision_port::{MockImageGenerationPort, MockImageUnderstandingPort};
#[cfg(test)]
pub use voice_input_port::MockVoiceInputPort;
