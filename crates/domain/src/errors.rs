//! Uniform capability error taxonomy
//!
//! Every provider classifies its own failures into this one enum at its
//! boundary; nothing else crosses a provider boundary. The orchestrator
//! treats all variants alike.

use thiserror::Error;

/// Outcome type shared by every capability call
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Failure of a single capability call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// Transport-level failure (connect, timeout, interrupted body)
    #[error("network failure: {0}")]
    Network(String),

    /// The remote service answered with a non-success status
    #[error("remote error (HTTP {status}): {body}")]
    Remote {
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, lossily decoded for diagnostics
        body: String,
    },

    /// The remote service answered 2xx but the body had an unexpected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Local audio input device failure
    #[error("audio device error: {0}")]
    Device(String),
}

impl CapabilityError {
    /// Create a remote error from a status code and raw body text
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of the failure, if it came from a remote response
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
