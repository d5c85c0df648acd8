//! Conversation entity - An append-only sequence of chat messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChatMessage, MessageRole};
use crate::value_objects::ConversationId;

/// A conversation containing an ordered sequence of messages
///
/// Messages can only be appended; the history is never rewritten. A fresh
/// conversation is created at session start and discarded at session end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier
    id: ConversationId,
    /// Messages in causal order (oldest first)
    messages: Vec<ChatMessage>,
    /// When the conversation started
    created_at: DateTime<Utc>,
    /// When the conversation was last appended to
    updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The conversation identifier
    #[must_use]
    pub const fn id(&self) -> ConversationId {
        self.id
    }

    /// Append a message to the conversation
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    /// Append a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessage::user(content));
    }

    /// Append an assistant message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessage::assistant(content));
    }

    /// Messages in causal order
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The last message in the conversation
    #[must_use]
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// The last user message
    #[must_use]
    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
    }

    /// Number of messages in the conversation
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Check if the conversation is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// When the conversation started
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the conversation was last appended to
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_conversation_is_empty() {
        let conv = Conversation::new();
        assert!(conv.is_empty());
        assert_eq!(conv.message_count(), 0);
    }

    #[test]
    fn messages_can_be_appended() {
        let mut conv = Conversation::new();
        conv.add_user_message("Hello");
        conv.add_assistant_message("Hi there!");

        assert_eq!(conv.message_count(), 2);
        assert_eq!(conv.last_message().unwrap().content, "Hi there!");
    }

    #[test]
    fn messages_keep_causal_order() {
        let mut conv = Conversation::new();
        conv.add_user_message("first");
        conv.add_assistant_message("second");
        conv.add_user_message("third");

        let contents: Vec<&str> = conv.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn last_user_message_is_found() {
        let mut conv = Conversation::new();
        conv.add_user_message("First question");
        conv.add_assistant_message("First answer");
        conv.add_user_message("Second question");
        conv.add_assistant_message("Second answer");

        let last_user = conv.last_user_message().unwrap();
        assert_eq!(last_user.content, "Second question");
    }

    #[test]
    fn last_user_message_returns_none_when_no_user_messages() {
        let mut conv = Conversation::new();
        conv.add_assistant_message("Hi");
        assert!(conv.last_user_message().is_none());
    }

    #[test]
    fn conversation_has_unique_id() {
        let conv1 = Conversation::new();
        let conv2 = Conversation::new();
        assert_ne!(conv1.id(), conv2.id());
    }

    #[test]
    fn last_message_returns_none_for_empty_conversation() {
        let conv = Conversation::new();
        assert!(conv.last_message().is_none());
    }

    #[test]
    fn add_message_updates_timestamp() {
        let mut conv = Conversation::new();
        let before = conv.updated_at();
        std::thread::sleep(std::time::Duration::from_millis(10));
        conv.add_user_message("Hello");
        assert!(conv.updated_at() > before);
    }

    #[test]
    fn default_creates_new_conversation() {
        let conv = Conversation::default();
        assert!(conv.is_empty());
    }
}
