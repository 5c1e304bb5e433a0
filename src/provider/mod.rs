//! Model Providers
//!
//! Provider profiles and HTTP completion clients for the LLM services that
//! produce summaries. Clients are async; the summarization oracle drives them
//! synchronously, one request at a time.

pub mod clients;
pub mod profile;

pub use clients::{create_client, AnthropicClient, OpenAiClient};
pub use profile::{
    provider_type_slug, validate_provider, ProviderConfig, ProviderType, ValidationResult,
};

use crate::error::OracleError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Completion request options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionOptions {
    /// Response length cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: Some(200),
            temperature: Some(0.5),
            top_p: None,
        }
    }
}

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Resolved provider, ready to construct a client.
#[derive(Debug, Clone)]
pub enum ModelProvider {
    OpenAI {
        model: String,
        api_key: String,
        base_url: Option<String>,
    },
    Anthropic {
        model: String,
        api_key: String,
        base_url: Option<String>,
    },
    Ollama {
        model: String,
        base_url: Option<String>,
    },
    LocalCustom {
        model: String,
        endpoint: String,
        api_key: Option<String>,
    },
}

impl ModelProvider {
    pub fn model_name(&self) -> &str {
        match self {
            ModelProvider::OpenAI { model, .. }
            | ModelProvider::Anthropic { model, .. }
            | ModelProvider::Ollama { model, .. }
            | ModelProvider::LocalCustom { model, .. } => model,
        }
    }
}

/// A chat-completion capable client.
///
/// Implementations request exactly one completion (single candidate) and
/// return its text untrimmed.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: &CompletionOptions,
    ) -> Result<String, OracleError>;

    fn model(&self) -> &str;
}
