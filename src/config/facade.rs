//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ArborConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Global config file path (`$XDG_CONFIG_HOME/arbor/config.toml`)
    pub fn global_config_path() -> Option<PathBuf> {
        super::xdg::arbor_config_dir()
            .ok()
            .map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from files and environment.
    pub fn load(workspace_root: &Path) -> Result<ArborConfig, ApiError> {
        let config = MergeService::load(workspace_root)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<ArborConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}
