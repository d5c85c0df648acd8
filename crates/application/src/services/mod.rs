//! Application services

mod session;

pub use session::{
    CapabilityProviders, ConversationSession, DEFAULT_PERSONA, SessionConfig, SessionState,
};
