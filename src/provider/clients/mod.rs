//! HTTP completion clients

mod anthropic;
mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

use super::{CompletionClient, ModelProvider};

pub(crate) const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub(crate) const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub(crate) const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Build the client for a resolved provider.
///
/// Ollama and local custom endpoints speak the OpenAI chat-completions protocol.
pub fn create_client(provider: &ModelProvider) -> Box<dyn CompletionClient> {
    match provider {
        ModelProvider::OpenAI {
            model,
            api_key,
            base_url,
        } => Box::new(OpenAiClient::new(
            model.clone(),
            Some(api_key.clone()),
            base_url.clone().unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
        )),
        ModelProvider::Anthropic {
            model,
            api_key,
            base_url,
        } => Box::new(AnthropicClient::new(
            model.clone(),
            api_key.clone(),
            base_url
                .clone()
                .unwrap_or_else(|| ANTHROPIC_BASE_URL.to_string()),
        )),
        ModelProvider::Ollama { model, base_url } => {
            let base = base_url.as_deref().unwrap_or(OLLAMA_BASE_URL);
            Box::new(OpenAiClient::new(
                model.clone(),
                None,
                format!("{}/v1", base.trim_end_matches('/')),
            ))
        }
        ModelProvider::LocalCustom {
            model,
            endpoint,
            api_key,
        } => Box::new(OpenAiClient::new(
            model.clone(),
            api_key.clone(),
            endpoint.clone(),
        )),
    }
}

/// Read a non-success response into an [`OracleError::Status`](crate::error::OracleError::Status).
pub(crate) async fn status_error(response: reqwest::Response) -> crate::error::OracleError {
    let code = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    crate::error::OracleError::Status { code, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_keeps_model() {
        let client = create_client(&ModelProvider::Ollama {
            model: "llama3".to_string(),
            base_url: None,
        });
        assert_eq!(client.model(), "llama3");

        let client = create_client(&ModelProvider::Anthropic {
            model: "claude-haiku".to_string(),
            api_key: "key".to_string(),
            base_url: None,
        });
        assert_eq!(client.model(), "claude-haiku");
    }
}
