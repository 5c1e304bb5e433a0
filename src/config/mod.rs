//! Configuration
//!
//! Layered configuration built with the `config` crate. Precedence, lowest to
//! highest: built-in defaults, global file (`$XDG_CONFIG_HOME/arbor/config.toml`),
//! workspace file (`<workspace>/arbor.toml`), environment (`ARBOR__SECTION__KEY`).

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod workspace;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use workspace::storage_paths::StorageConfig;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::provider::ProviderConfig;
use crate::store::CheckpointMode;
use crate::tokens::INPUT_TOKEN_BUDGET;
use crate::types::INIT_MARKER;
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArborConfig {
    #[serde(default)]
    pub summarization: SummarizationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_input_token_budget() -> usize {
    INPUT_TOKEN_BUDGET
}

fn default_excluded_names() -> Vec<String> {
    vec![INIT_MARKER.to_string()]
}

/// Summarization policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizationConfig {
    /// Maximum estimated input tokens per provider call
    #[serde(default = "default_input_token_budget")]
    pub input_token_budget: usize,

    /// Node names excluded from summarization
    #[serde(default = "default_excluded_names")]
    pub excluded_names: Vec<String>,

    /// One-shot example prompt file; the built-in example is used when unset
    #[serde(default)]
    pub example_prompt_path: Option<String>,

    #[serde(default)]
    pub checkpoint_mode: CheckpointMode,
}

impl Default for SummarizationConfig {
    fn default() -> Self {
        Self {
            input_token_budget: default_input_token_budget(),
            excluded_names: default_excluded_names(),
            example_prompt_path: None,
            checkpoint_mode: CheckpointMode::default(),
        }
    }
}

impl ArborConfig {
    /// Validate settings that every command depends on.
    ///
    /// Provider settings are checked when a provider is actually built.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.summarization.input_token_budget == 0 {
            return Err(ApiError::ConfigError(
                "summarization.input_token_budget must be positive".to_string(),
            ));
        }
        if self
            .summarization
            .excluded_names
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(ApiError::ConfigError(
                "summarization.excluded_names must not contain empty names".to_string(),
            ));
        }
        Ok(())
    }
}
