//! OpenAI-compatible chat completion adapter

use std::time::Duration;

use application::{ApplicationError, CompletionPort, CompletionReply};
use async_trait::async_trait;
use domain::{CapabilityError, CapabilityResult, Conversation};
use provider_http::{ProviderClient, ProviderClientConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::LanguageConfig;

/// Completion provider backed by an OpenAI-compatible chat endpoint
#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    client: ProviderClient,
    config: LanguageConfig,
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

/// One `{role, content}` entry of the request
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiCompletionClient {
    /// Create a new completion client
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: LanguageConfig) -> Result<Self, ApplicationError> {
        config.validate().map_err(ApplicationError::Configuration)?;

        let client = ProviderClient::with_config(
            ProviderClientConfig::default().with_timeout(Duration::from_millis(config.timeout_ms)),
        )
        .map_err(|e| {
            ApplicationError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self { client, config })
    }

    /// The configured chat model
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Persona as the system entry, then the full history in order
    fn build_messages<'a>(persona: &'a str, conversation: &'a Conversation) -> Vec<WireMessage<'a>> {
        let mut messages = Vec::with_capacity(conversation.message_count() + 1);
        messages.push(WireMessage {
            role: "system",
            content: persona,
        });
        for message in conversation.messages() {
            messages.push(WireMessage {
                role: message.role.as_str(),
                content: &message.content,
            });
        }
        messages
    }
}

#[async_trait]
impl CompletionPort for OpenAiCompletionClient {
    #[instrument(skip(self, persona, conversation), fields(msg_count = conversation.message_count()))]
    async fn complete(
        &self,
        persona: &str,
        conversation: &Conversation,
    ) -> CapabilityResult<CompletionReply> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: Self::build_messages(persona, conversation),
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.is_success() {
            // the raw body is the diagnostic the caller displays
            return Err(CapabilityError::remote(response.status(), response.text()));
        }

        let chat: ChatResponse = response.json()?;
        let choice = chat.choices.into_iter().next().ok_or_else(|| {
            CapabilityError::MalformedResponse("completion response contained no choices".to_string())
        })?;

        debug!(
            model = chat.model.as_deref().unwrap_or("unknown"),
            reply_len = choice.message.content.len(),
            "Completion received"
        );

        Ok(CompletionReply {
            content: choice.message.content,
            model: chat.model,
        })
    }
}
