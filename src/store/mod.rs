//! Tree Store
//!
//! Persists project trees as self-contained nested JSON documents. The same
//! format serves as pipeline input, per-level checkpoint, and final output.

pub mod checkpoint;
pub mod persistence;

pub use checkpoint::{CheckpointMode, Checkpointer, FileCheckpointer};
pub use persistence::{load_tree, save_tree, to_document_string};

use std::path::PathBuf;

/// File naming for one run, keyed by project and model identifier.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub project: String,
    pub model: String,
    pub tree_dir: PathBuf,
    pub summaries_dir: PathBuf,
    pub index_dir: PathBuf,
}

impl RunPaths {
    pub fn new(
        project: impl Into<String>,
        model: impl Into<String>,
        tree_dir: impl Into<PathBuf>,
        summaries_dir: impl Into<PathBuf>,
        index_dir: impl Into<PathBuf>,
    ) -> Self {
        RunPaths {
            project: project.into(),
            model: model.into(),
            tree_dir: tree_dir.into(),
            summaries_dir: summaries_dir.into(),
            index_dir: index_dir.into(),
        }
    }

    /// Input tree built upstream: `<tree_dir>/<project>.json`
    pub fn input_tree(&self) -> PathBuf {
        self.tree_dir.join(format!("{}.json", self.project))
    }

    /// Final summarized tree: `<summaries_dir>/<project>_summary_<model>.json`
    pub fn output_tree(&self) -> PathBuf {
        self.summaries_dir
            .join(format!("{}_summary_{}.json", self.project, self.model))
    }

    /// Level-indexed checkpoint under `<summaries_dir>/checkpoints/`
    pub fn level_checkpoint(&self, level: usize) -> PathBuf {
        self.summaries_dir.join("checkpoints").join(format!(
            "{}_summary_{}.level{}.json",
            self.project, self.model, level
        ))
    }

    /// Ordered path list consumed by the similarity stage
    pub fn index_paths(&self) -> PathBuf {
        self.index_dir
            .join(format!("{}_{}_paths.json", self.project, self.model))
    }

    /// Ordered summary list, positionally aligned with [`RunPaths::index_paths`]
    pub fn index_summaries(&self) -> PathBuf {
        self.index_dir
            .join(format!("{}_{}_summaries.json", self.project, self.model))
    }

    /// Path-to-summary lookup covering every file, summarized or not
    pub fn index_summary_map(&self) -> PathBuf {
        self.index_dir
            .join(format!("{}_{}_summary_map.json", self.project, self.model))
    }
}
