//! Per-level checkpoints
//!
//! After every completed level the whole tree is persisted, so an interrupted
//! run loses at most the level that was in progress.

use super::persistence::save_tree;
use super::RunPaths;
use crate::error::StorageError;
use crate::tree::Node;
use crate::types::Level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where level checkpoints are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointMode {
    /// Rewrite the run's output document after every level
    #[default]
    Overwrite,
    /// Keep one document per level in addition to the output document
    PerLevel,
}

impl std::str::FromStr for CheckpointMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(CheckpointMode::Overwrite),
            "per_level" | "per-level" => Ok(CheckpointMode::PerLevel),
            _ => Err(format!(
                "Invalid checkpoint mode: {} (must be 'overwrite' or 'per_level')",
                s
            )),
        }
    }
}

/// Durable snapshot sink used by the summarizer after each level.
pub trait Checkpointer {
    /// Persist the entire tree after `level` has been processed.
    fn checkpoint(&self, root: &Node, level: Level) -> Result<PathBuf, StorageError>;
}

/// Checkpointer writing JSON documents under the run's summaries directory.
#[derive(Debug, Clone)]
pub struct FileCheckpointer {
    paths: RunPaths,
    mode: CheckpointMode,
}

impl FileCheckpointer {
    pub fn new(paths: RunPaths, mode: CheckpointMode) -> Self {
        FileCheckpointer { paths, mode }
    }

    pub fn paths(&self) -> &RunPaths {
        &self.paths
    }
}

impl Checkpointer for FileCheckpointer {
    fn checkpoint(&self, root: &Node, level: Level) -> Result<PathBuf, StorageError> {
        let output = self.paths.output_tree();
        if self.mode == CheckpointMode::PerLevel {
            save_tree(root, &self.paths.level_checkpoint(level))?;
        }
        save_tree(root, &output)?;
        Ok(output)
    }
}
