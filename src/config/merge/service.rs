//! MergeService: orchestrates sources, applies merge policy, deserializes to ArborConfig.

use super::policy;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::ArborConfig;
use config::{ConfigError, File};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from workspace and standard sources.
    /// Precedence: global file (lowest) -> workspace file -> environment (highest).
    pub fn load(workspace_root: &Path) -> Result<ArborConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ArborConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CheckpointMode;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
            [summarization]
            input_token_budget = 2048
            checkpoint_mode = "per_level"

            [storage]
            summaries_dir = "out"
            "#,
        )
        .unwrap();

        let config = MergeService::load_from_file(&path).unwrap();
        assert_eq!(config.summarization.input_token_budget, 2048);
        assert_eq!(config.summarization.checkpoint_mode, CheckpointMode::PerLevel);
        assert_eq!(config.summarization.excluded_names, vec!["__init__.py"]);
        assert_eq!(config.storage.summaries_dir, std::path::PathBuf::from("out"));
        assert_eq!(
            config.storage.tree_dir,
            std::path::PathBuf::from("project_tree")
        );
    }

    #[test]
    fn test_workspace_file_is_layered() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("arbor.toml"),
            "[provider]\nprovider_type = \"ollama\"\nmodel = \"llama3\"\n",
        )
        .unwrap();

        let config = MergeService::load(temp.path()).unwrap();
        assert_eq!(config.provider.model, "llama3");
        assert_eq!(config.summarization.input_token_budget, 3096);
    }
}
