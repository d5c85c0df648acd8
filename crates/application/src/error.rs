//! Application-level errors

use domain::CapabilityError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// A capability call failed; the display carries the provider diagnostic
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// A completion request is already in flight for this session
    #[error("a completion request is already in flight")]
    SessionBusy,

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// The underlying capability error, if any
    #[must_use]
    pub const fn capability(&self) -> Option<&CapabilityError> {
        match self {
            Self::Capability(err) => Some(err),
            _ => None,
        }
    }
}
