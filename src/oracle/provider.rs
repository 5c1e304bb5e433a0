//! Oracle backed by an HTTP completion client.

use super::prompt::build_prompt;
use super::SummaryOracle;
use crate::error::{ApiError, OracleError};
use crate::provider::{
    create_client, ChatMessage, CompletionClient, CompletionOptions, ProviderConfig,
};
use std::time::Duration;
use tokio::runtime::Runtime;

/// Blocking oracle: one request at a time, each bounded by a timeout.
pub struct ProviderOracle {
    client: Box<dyn CompletionClient>,
    options: CompletionOptions,
    timeout: Duration,
    runtime: Runtime,
}

impl ProviderOracle {
    pub fn new(
        client: Box<dyn CompletionClient>,
        options: CompletionOptions,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;
        Ok(Self {
            client,
            options,
            timeout,
            runtime,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        let provider = config.to_model_provider()?;
        tracing::info!(
            provider = %config.display_name(),
            model = %provider.model_name(),
            "Provider oracle ready"
        );
        Self::new(
            create_client(&provider),
            config.default_options.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }
}

impl SummaryOracle for ProviderOracle {
    fn summarize(&self, content: &str, example: &str) -> Result<String, OracleError> {
        let messages = vec![ChatMessage::user(build_prompt(example, content))];
        let completion = self.runtime.block_on(async {
            match tokio::time::timeout(self.timeout, self.client.complete(messages, &self.options))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(OracleError::Timeout(self.timeout.as_secs())),
            }
        })?;
        Ok(completion.trim().to_string())
    }
}
