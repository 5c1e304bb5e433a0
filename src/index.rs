//! Summary Index Export
//!
//! Hands summarized files to the embedding/similarity stage as two JSON lists:
//! paths and summaries, positionally aligned. The similarity matrix rows follow
//! the same order, so the lists must never be reordered independently.
//!
//! A third file maps every file path to its summary, labelling unsummarized
//! files "No Summary Found", for annotating similarity results.

use crate::error::StorageError;
use crate::store::RunPaths;
use crate::tree::{collect_summaries, summary_map, Node};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Files written by [`export_index`].
#[derive(Debug, Clone, Serialize)]
pub struct IndexExport {
    pub entries: usize,
    pub paths_file: PathBuf,
    pub summaries_file: PathBuf,
    pub summary_map_file: PathBuf,
}

/// Write the ordered path and summary lists for one project/model run.
pub fn export_index(
    root: &Node,
    paths: &RunPaths,
    excluded_names: &[String],
) -> Result<IndexExport, StorageError> {
    let entries = collect_summaries(root, excluded_names);
    let (node_paths, summaries): (Vec<String>, Vec<String>) = entries
        .into_iter()
        .map(|entry| (entry.path, entry.summary))
        .unzip();

    let paths_file = paths.index_paths();
    let summaries_file = paths.index_summaries();
    let summary_map_file = paths.index_summary_map();
    write_json(&node_paths, &paths_file)?;
    write_json(&summaries, &summaries_file)?;
    write_json(&summary_map(root), &summary_map_file)?;

    tracing::info!(
        entries = node_paths.len(),
        paths = %paths_file.display(),
        "Summary index exported"
    );

    Ok(IndexExport {
        entries: node_paths.len(),
        paths_file,
        summaries_file,
        summary_map_file,
    })
}

fn write_json<T: Serialize + ?Sized>(value: &T, destination: &Path) -> Result<(), StorageError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::serialization(destination, e))?;
    fs::write(destination, content).map_err(|e| StorageError::io(destination, e))
}
