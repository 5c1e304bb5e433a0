//! Downstream collection of file summaries
//!
//! The similarity stage consumes file summaries as an ordered list and zips it
//! with a companion path index by position, so collection order must be stable.

use super::node::Node;
use crate::types::UNKNOWN_SUMMARY;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One summarized file, keyed by its path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub path: String,
    pub summary: String,
}

/// Collect `(path, summary)` for every summarized, non-excluded file.
///
/// Pre-order depth-first in child order. Excluded nodes are skipped together
/// with their subtrees; directories never appear in the result.
pub fn collect_summaries(root: &Node, excluded_names: &[String]) -> Vec<SummaryEntry> {
    let mut entries = Vec::new();
    collect_into(root, excluded_names, &mut entries);
    entries
}

fn collect_into(node: &Node, excluded_names: &[String], entries: &mut Vec<SummaryEntry>) {
    if node.is_excluded(excluded_names) {
        return;
    }
    if !node.is_dir && node.has_summary() {
        entries.push(SummaryEntry {
            path: node.path.clone(),
            summary: node.summary.clone(),
        });
    }
    for child in &node.children {
        collect_into(child, excluded_names, entries);
    }
}

/// Map every file path to its summary, using [`UNKNOWN_SUMMARY`] where none exists.
pub fn summary_map(root: &Node) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_dir {
            stack.extend(node.children.iter());
            continue;
        }
        let summary = node.summary.trim();
        let summary = if summary.is_empty() {
            UNKNOWN_SUMMARY.to_string()
        } else {
            summary.to_string()
        };
        map.insert(node.path.clone(), summary);
    }
    map
}
