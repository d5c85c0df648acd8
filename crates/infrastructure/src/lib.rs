//! Infrastructure layer for Ari
//!
//! Configuration loading, telemetry initialization, the ephemeral
//! synthesized-audio artifact store, and the composition root that wires a
//! `ConversationSession` from configuration.

pub mod audio_store;
pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use audio_store::AudioArtifactStore;
pub use bootstrap::build_session;
pub use config::AssistantConfig;
