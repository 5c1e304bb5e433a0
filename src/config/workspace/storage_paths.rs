//! StorageConfig and per-run path resolution against the workspace root.

use crate::store::RunPaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_tree_dir() -> PathBuf {
    PathBuf::from("project_tree")
}

fn default_summaries_dir() -> PathBuf {
    PathBuf::from("summaries")
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("similarity_matrices")
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Input trees (relative to workspace root unless absolute)
    #[serde(default = "default_tree_dir")]
    pub tree_dir: PathBuf,

    /// Summarized trees and checkpoints
    #[serde(default = "default_summaries_dir")]
    pub summaries_dir: PathBuf,

    /// Summary index lists
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,
}

impl StorageConfig {
    /// Resolve storage directories to filesystem locations.
    ///
    /// `Path::join` keeps absolute configured paths unchanged.
    pub fn resolve_dirs(&self, workspace_root: &Path) -> (PathBuf, PathBuf, PathBuf) {
        (
            workspace_root.join(&self.tree_dir),
            workspace_root.join(&self.summaries_dir),
            workspace_root.join(&self.index_dir),
        )
    }

    /// File naming for one project/model run.
    pub fn run_paths(&self, workspace_root: &Path, project: &str, model: &str) -> RunPaths {
        let (tree_dir, summaries_dir, index_dir) = self.resolve_dirs(workspace_root);
        RunPaths::new(project, model, tree_dir, summaries_dir, index_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            tree_dir: default_tree_dir(),
            summaries_dir: default_summaries_dir(),
            index_dir: default_index_dir(),
        }
    }
}
