//! Bottom-Up Summarization
//!
//! Walks the project tree level by level from the deepest nodes to the root.
//! Files are summarized from their code elements (or whole code), directories
//! from their children's summaries. Since every child sits exactly one level
//! below its parent, all child summaries exist before the parent is visited.
//!
//! The whole tree is checkpointed after each level; an interrupted run loses at
//! most the level in progress. Nodes that already carry a summary are never
//! summarized again, which makes rerunning over a checkpoint safe.

use crate::error::ApiError;
use crate::oracle::{summarize_or_empty, SummaryOracle, DEFAULT_EXAMPLE_PROMPT};
use crate::store::Checkpointer;
use crate::tokens::{estimate_tokens, TokenBudget, INPUT_TOKEN_BUDGET};
use crate::tree::{partition_addresses, Node};
use crate::types::INIT_MARKER;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Explicit per-run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub project: String,
    pub model: String,
    /// Maximum estimated input tokens per oracle call
    pub token_budget: usize,
    /// One-shot example prepended to every request
    pub example_prompt: String,
    /// Node names skipped entirely (left with an empty summary)
    pub excluded_names: Vec<String>,
}

impl RunConfig {
    pub fn new(project: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            model: model.into(),
            token_budget: INPUT_TOKEN_BUDGET,
            example_prompt: DEFAULT_EXAMPLE_PROMPT.to_string(),
            excluded_names: vec![INIT_MARKER.to_string()],
        }
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub project: String,
    pub model: String,
    pub levels_processed: usize,
    /// Nodes that received a summary during this run
    pub nodes_summarized: usize,
    /// Code element summaries produced during this run
    pub element_summaries: usize,
    /// Nodes or fragments skipped for exceeding the token budget
    pub budget_skips: usize,
    pub oracle_failures: usize,
    pub excluded_nodes: usize,
    /// Nodes left untouched because they were already summarized
    pub already_summarized: usize,
    pub checkpoints_written: usize,
    pub last_checkpoint: Option<PathBuf>,
    pub duration_ms: u64,
}

/// Orchestrates the level-by-level pass over one tree.
pub struct BottomUpSummarizer<'a> {
    oracle: &'a dyn SummaryOracle,
    config: &'a RunConfig,
    checkpointer: &'a dyn Checkpointer,
    budget: TokenBudget,
}

impl<'a> BottomUpSummarizer<'a> {
    pub fn new(
        oracle: &'a dyn SummaryOracle,
        config: &'a RunConfig,
        checkpointer: &'a dyn Checkpointer,
    ) -> Self {
        Self {
            oracle,
            config,
            checkpointer,
            budget: TokenBudget::new(config.token_budget),
        }
    }

    /// Summarize `root` in place, deepest level first, checkpointing after each level.
    ///
    /// Oracle failures and budget skips leave summaries empty and never abort the
    /// run. A checkpoint failure does: progress could no longer be recorded.
    pub fn run(&self, root: &mut Node) -> Result<RunReport, ApiError> {
        let start_time = Instant::now();
        let mut report = RunReport {
            project: self.config.project.clone(),
            model: self.config.model.clone(),
            ..RunReport::default()
        };

        let partition = partition_addresses(root);
        info!(
            project = %self.config.project,
            model = %self.config.model,
            levels = partition.len(),
            nodes = root.node_count(),
            files = root.file_count(),
            budget = self.budget.limit(),
            "Starting bottom-up summarization"
        );

        for (level, addresses) in partition.iter_bottom_up() {
            info!(level, nodes = addresses.len(), "Processing level");
            for address in addresses {
                let Some(node) = address.resolve_mut(root) else {
                    continue;
                };
                self.summarize_node(node, &mut report);
            }

            let checkpoint = self.checkpointer.checkpoint(root, level)?;
            info!(level, path = %checkpoint.display(), "Checkpoint saved");
            report.levels_processed += 1;
            report.checkpoints_written += 1;
            report.last_checkpoint = Some(checkpoint);
        }

        report.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            project = %report.project,
            summarized = report.nodes_summarized,
            total_summarized = root.summarized_count(),
            budget_skips = report.budget_skips,
            oracle_failures = report.oracle_failures,
            duration_ms = report.duration_ms,
            "Summarization complete"
        );
        Ok(report)
    }

    fn summarize_node(&self, node: &mut Node, report: &mut RunReport) {
        if node.is_excluded(&self.config.excluded_names) {
            debug!(path = %node.path, "Skipping excluded node");
            node.summary.clear();
            node.code_element_summaries.clear();
            report.excluded_nodes += 1;
            return;
        }

        if node.has_summary() {
            report.already_summarized += 1;
            return;
        }

        let summary = if node.is_dir {
            self.summarize_directory(node, report)
        } else if !node.code_elements.is_empty() {
            self.summarize_elements(node, report)
        } else {
            self.summarize_code(node, report)
        };

        if let Some(summary) = summary.filter(|s| !s.is_empty()) {
            node.summary = summary;
            report.nodes_summarized += 1;
        }
    }

    fn summarize_directory(&self, node: &Node, report: &mut RunReport) -> Option<String> {
        let content = node
            .children
            .iter()
            .filter(|child| child.has_summary())
            .map(|child| child.summary.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if content.is_empty() {
            debug!(path = %node.path, "No child summaries, directory left unsummarized");
            return None;
        }

        debug!(path = %node.path, "Summarizing directory");
        self.gated_summary(&node.path, &content, report)
    }

    fn summarize_elements(&self, node: &mut Node, report: &mut RunReport) -> Option<String> {
        debug!(path = %node.path, elements = node.code_elements.len(), "Summarizing code elements");

        // Gate rejections are skipped; oracle failures keep their "" slot
        let element_summaries: Vec<String> = node
            .code_elements
            .iter()
            .filter_map(|element| self.gated_summary(&node.path, element, report))
            .collect();
        report.element_summaries += element_summaries.iter().filter(|s| !s.is_empty()).count();
        node.code_element_summaries = element_summaries;

        if node.code_element_summaries.iter().all(|s| s.is_empty()) {
            debug!(path = %node.path, "No element summaries produced, file left unsummarized");
            return None;
        }
        let content = node.code_element_summaries.join("\n");

        debug!(path = %node.path, "Summarizing file from element summaries");
        self.gated_summary(&node.path, &content, report)
    }

    fn summarize_code(&self, node: &Node, report: &mut RunReport) -> Option<String> {
        debug!(path = %node.path, "Summarizing entire file");
        self.gated_summary(&node.path, &node.code, report)
    }

    /// Apply the budget gate, then call the oracle.
    ///
    /// `None` means the gate rejected the content; `Some("")` means the oracle failed.
    fn gated_summary(&self, path: &str, content: &str, report: &mut RunReport) -> Option<String> {
        if !self.budget.admits(content) {
            warn!(
                path,
                tokens = estimate_tokens(content),
                budget = self.budget.limit(),
                "Content too long to summarize"
            );
            report.budget_skips += 1;
            return None;
        }

        let (summary, failure) =
            summarize_or_empty(self.oracle, content, &self.config.example_prompt);
        if failure.is_some() {
            warn!(path, "Summary left empty after oracle failure");
            report.oracle_failures += 1;
        }
        Some(summary)
    }
}
