//! Merge policy: built-in defaults every layer is merged over.

use crate::tokens::INPUT_TOKEN_BUDGET;
use crate::types::INIT_MARKER;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Start a builder seeded with the defaults that later layers override.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("summarization.input_token_budget", INPUT_TOKEN_BUDGET as i64)?
        .set_default("summarization.excluded_names", vec![INIT_MARKER])?
        .set_default("summarization.checkpoint_mode", "overwrite")?
        .set_default("storage.tree_dir", "project_tree")?
        .set_default("storage.summaries_dir", "summaries")?
        .set_default("storage.index_dir", "similarity_matrices")
}
