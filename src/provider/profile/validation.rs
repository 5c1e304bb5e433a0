use super::config::{ProviderConfig, ProviderType};

/// Check-by-check validation report for a provider configuration.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub provider_name: String,
    pub checks: Vec<(String, bool)>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new(provider_name: String) -> Self {
        Self {
            provider_name,
            checks: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_check(&mut self, description: &str, passed: bool) {
        self.checks.push((description.to_string(), passed));
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|(_, passed)| *passed).count()
    }
}

pub fn provider_type_slug(provider_type: ProviderType) -> &'static str {
    match provider_type {
        ProviderType::OpenAI => "openai",
        ProviderType::Anthropic => "anthropic",
        ProviderType::Ollama => "ollama",
        ProviderType::LocalCustom => "local",
    }
}

/// Run every provider check, collecting all failures rather than stopping at the first.
pub fn validate_provider(provider: &ProviderConfig) -> ValidationResult {
    let mut result = ValidationResult::new(provider.display_name());

    if provider.model.trim().is_empty() {
        result.add_error("Model name cannot be empty".to_string());
    } else {
        result.add_check("Model is not empty", true);
    }

    match provider.provider_type.api_key_env_var() {
        Some(env_var) => {
            if provider.api_key.is_some() {
                result.add_check("API key available (from config)", true);
            } else if provider.resolve_api_key().is_some() {
                result.add_check("API key available (from environment)", true);
            } else {
                result.add_error(format!(
                    "API key not found (set {} or add to config)",
                    env_var
                ));
            }
        }
        None => result.add_check("API key not required for local provider", true),
    }

    match &provider.endpoint {
        Some(endpoint) => {
            if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
                result.add_check("Endpoint URL is valid", true);
            } else {
                result.add_error(format!("Invalid endpoint URL: {}", endpoint));
            }
        }
        None if provider.provider_type == ProviderType::LocalCustom => {
            result.add_error("Endpoint is required for local custom provider".to_string());
        }
        None => result.add_check("Endpoint URL (default)", true),
    }

    if let Some(temp) = provider.default_options.temperature {
        if (0.0..=2.0).contains(&temp) {
            result.add_check("Temperature is in valid range (0.0-2.0)", true);
        } else {
            result.add_error(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                temp
            ));
        }
    }

    if let Some(max_tokens) = provider.default_options.max_tokens {
        if max_tokens > 0 {
            result.add_check("Max tokens is positive", true);
        } else {
            result.add_error("Max tokens must be positive".to_string());
        }
    }

    if let Some(top_p) = provider.default_options.top_p {
        if (0.0..=1.0).contains(&top_p) {
            result.add_check("Top-p is in valid range (0.0-1.0)", true);
        } else {
            result.add_error(format!("Top-p must be between 0.0 and 1.0, got {}", top_p));
        }
    }

    if provider.timeout_secs > 0 {
        result.add_check("Request timeout is positive", true);
    } else {
        result.add_error("Timeout must be at least one second".to_string());
    }

    result
}
