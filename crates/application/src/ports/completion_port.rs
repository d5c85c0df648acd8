//! Completion port - Interface for the text completion capability

use async_trait::async_trait;
use domain::{CapabilityResult, Conversation};
#[cfg(test)]
use mockall::automock;

/// Result of a completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReply {
    /// The assistant reply text
    pub content: String,
    /// Model that produced the reply, when the provider reports it
    pub model: Option<String>,
}

/// Port for turning a conversation transcript into one assistant reply
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Produce one reply for the persona followed by the full history in order
    ///
    /// # Arguments
    ///
    /// * `persona` - Fixed system-level instruction prepended to the request
    /// * `conversation` - The ordered message history
    ///
    /// # Errors
    ///
    /// Returns a `CapabilityError` classifying the failure; implementations
    /// never panic across this boundary.
    async fn complete(
        &self,
        persona: &str,
        conversation: &Conversation,
    ) -> CapabilityResult<CompletionReply>;
}
