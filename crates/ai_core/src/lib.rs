//! AI Core - Text completion provider
//!
//! Implements `CompletionPort` against an OpenAI-compatible chat-completions
//! endpoint: the fixed persona goes out as the system message, followed by
//! the full conversation history in order, and the first choice of the
//! response becomes the assistant reply.

pub mod completion;
pub mod config;

pub use completion::OpenAiCompletionClient;
pub use config::LanguageConfig;
