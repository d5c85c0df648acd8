//! Application layer - Orchestration of the capability providers
//!
//! Defines the port traits each capability adapter implements and the
//! [`ConversationSession`] orchestrator that owns the conversation history
//! and mediates every capability call.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
