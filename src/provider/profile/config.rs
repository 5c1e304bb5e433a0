use crate::error::ApiError;
use crate::provider::clients::{OLLAMA_BASE_URL, OPENAI_BASE_URL};
use crate::provider::{CompletionOptions, ModelProvider};
use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Provider configuration, read from the `[provider]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name for logs and reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,

    #[serde(default)]
    pub provider_type: ProviderType,

    /// Model identifier; also keys the run's output files.
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; falls back to the provider's environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub default_options: CompletionOptions,

    /// Upper bound on a single summarization request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_name: None,
            provider_type: ProviderType::default(),
            model: default_model(),
            api_key: None,
            endpoint: None,
            default_options: CompletionOptions::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Provider type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProviderType {
    #[default]
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
    #[serde(rename = "local")]
    LocalCustom,
}

impl std::str::FromStr for ProviderType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(ProviderType::OpenAI),
            "anthropic" => Ok(ProviderType::Anthropic),
            "ollama" => Ok(ProviderType::Ollama),
            "local" => Ok(ProviderType::LocalCustom),
            _ => Err(ApiError::ConfigError(format!(
                "Invalid provider type: {}. Must be openai, anthropic, ollama, or local",
                s
            ))),
        }
    }
}

impl ProviderType {
    pub fn api_key_env_var(self) -> Option<&'static str> {
        match self {
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderType::Ollama | ProviderType::LocalCustom => None,
        }
    }

    pub fn default_endpoint(self) -> Option<&'static str> {
        match self {
            ProviderType::OpenAI => Some(OPENAI_BASE_URL),
            ProviderType::Ollama => Some(OLLAMA_BASE_URL),
            ProviderType::Anthropic | ProviderType::LocalCustom => None,
        }
    }
}

impl ProviderConfig {
    fn endpoint_has_scheme(endpoint: &str) -> bool {
        endpoint.starts_with("http://") || endpoint.starts_with("https://")
    }

    /// Label for logs: the configured name, or the provider type slug.
    pub fn display_name(&self) -> String {
        self.provider_name
            .clone()
            .unwrap_or_else(|| super::provider_type_slug(self.provider_type).to_string())
    }

    /// API key from config, else from the provider's environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key.clone().or_else(|| {
            self.provider_type
                .api_key_env_var()
                .and_then(|var| std::env::var(var).ok())
                .filter(|key| !key.is_empty())
        })
    }

    /// Validate provider configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            if !Self::endpoint_has_scheme(endpoint.trim()) {
                return Err(format!("Invalid endpoint URL: {}", endpoint));
            }
        } else if self.provider_type == ProviderType::LocalCustom {
            return Err("Endpoint is required for local custom provider".to_string());
        }

        if let Some(temp) = self.default_options.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temp
                ));
            }
        }

        if self.default_options.max_tokens == Some(0) {
            return Err("Max tokens must be positive".to_string());
        }

        if let Some(top_p) = self.default_options.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err(format!("Top-p must be between 0.0 and 1.0, got {}", top_p));
            }
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be at least one second".to_string());
        }

        Ok(())
    }

    /// Convert ProviderConfig to ModelProvider.
    pub fn to_model_provider(&self) -> Result<ModelProvider, ApiError> {
        self.validate().map_err(ApiError::ConfigError)?;
        let api_key = self.resolve_api_key();
        let endpoint = self.endpoint.as_ref().map(|e| e.trim().to_string());

        match self.provider_type {
            ProviderType::OpenAI => {
                let api_key = api_key.ok_or_else(|| {
                    ApiError::ProviderNotConfigured(
                        "OpenAI API key required (set in config or OPENAI_API_KEY env var)"
                            .to_string(),
                    )
                })?;
                Ok(ModelProvider::OpenAI {
                    model: self.model.clone(),
                    api_key,
                    base_url: endpoint,
                })
            }
            ProviderType::Anthropic => {
                let api_key = api_key.ok_or_else(|| {
                    ApiError::ProviderNotConfigured(
                        "Anthropic API key required (set in config or ANTHROPIC_API_KEY env var)"
                            .to_string(),
                    )
                })?;
                Ok(ModelProvider::Anthropic {
                    model: self.model.clone(),
                    api_key,
                    base_url: endpoint,
                })
            }
            ProviderType::Ollama => Ok(ModelProvider::Ollama {
                model: self.model.clone(),
                base_url: endpoint,
            }),
            ProviderType::LocalCustom => {
                let endpoint = endpoint.ok_or_else(|| {
                    ApiError::ProviderNotConfigured(
                        "Local custom provider requires endpoint".to_string(),
                    )
                })?;
                Ok(ModelProvider::LocalCustom {
                    model: self.model.clone(),
                    endpoint,
                    api_key,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(endpoint: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            provider_name: Some("local".to_string()),
            provider_type: ProviderType::LocalCustom,
            model: "llama3".to_string(),
            endpoint: endpoint.map(str::to_string),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_defaults_match_single_sentence_requests() {
        let config = ProviderConfig::default();
        assert_eq!(config.provider_type, ProviderType::OpenAI);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.default_options.max_tokens, Some(200));
    }

    #[test]
    fn test_deserialize_partial_table() {
        let config: ProviderConfig = toml::from_str(
            r#"
            provider_type = "ollama"
            model = "llama3"

            [default_options]
            temperature = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.provider_type, ProviderType::Ollama);
        assert_eq!(config.default_options.temperature, Some(0.2));
        assert_eq!(config.default_options.max_tokens, Some(200));
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_local_custom_requires_endpoint() {
        assert!(local(None).validate().is_err());
        assert!(local(Some("chat.internal")).validate().is_err());
        assert!(local(Some("https://chat.internal")).validate().is_ok());
    }

    #[test]
    fn test_local_custom_to_model_provider() {
        let mut config = local(Some("https://chat.internal/v1"));
        config.api_key = Some("test-key".to_string());
        match config.to_model_provider().unwrap() {
            ModelProvider::LocalCustom {
                endpoint, api_key, ..
            } => {
                assert_eq!(endpoint, "https://chat.internal/v1");
                assert_eq!(api_key.as_deref(), Some("test-key"));
            }
            other => panic!("Expected local custom provider, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_options_are_rejected() {
        let mut config = ProviderConfig::default();
        config.default_options.temperature = Some(3.0);
        assert!(config.validate().is_err());

        let mut config = ProviderConfig::default();
        config.default_options.top_p = Some(1.5);
        assert!(config.validate().is_err());

        let mut config = ProviderConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = ProviderConfig {
            provider_type: ProviderType::Ollama,
            model: "llama3".to_string(),
            ..ProviderConfig::default()
        };
        assert!(matches!(
            config.to_model_provider().unwrap(),
            ModelProvider::Ollama { .. }
        ));
    }

    #[test]
    fn test_provider_type_from_str() {
        assert_eq!("anthropic".parse::<ProviderType>().unwrap(), ProviderType::Anthropic);
        assert!("bedrock".parse::<ProviderType>().is_err());
    }
}
