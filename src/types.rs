//! Core types shared across the summarization pipeline.

/// Depth of a node below the root (root = 0).
pub type Level = usize;

/// Name of the empty-module marker file excluded from summarization by default.
pub const INIT_MARKER: &str = "__init__.py";

/// Label used downstream for files that carry no summary.
pub const UNKNOWN_SUMMARY: &str = "No Summary Found";
