//! Domain entities

mod audio;
mod chat_message;
mod conversation;

pub use audio::{AudioClip, AudioFormat};
pub use chat_message::{ChatMessage, MessageRole};
pub use conversation::Conversation;
