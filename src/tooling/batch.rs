//! Batch summarization
//!
//! Runs the bottom-up summarizer over several projects in sequence. Each
//! project is independent: a missing input or a failed run is recorded in the
//! report and the batch moves on to the next project.

use crate::config::StorageConfig;
use crate::error::{ApiError, StorageError};
use crate::oracle::SummaryOracle;
use crate::store::{load_tree, CheckpointMode, FileCheckpointer, RunPaths};
use crate::summarize::{BottomUpSummarizer, RunConfig, RunReport};
use crate::tree::Node;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Parameters shared by every project in one batch.
#[derive(Debug, Clone)]
pub struct SummarizeRequest {
    pub projects: Vec<String>,
    pub model: String,
    pub token_budget: usize,
    pub checkpoint_mode: CheckpointMode,
    /// Continue from the run's output document when one exists
    pub resume: bool,
    pub example_prompt: String,
    pub excluded_names: Vec<String>,
}

/// What happened to one project.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProjectOutcome {
    Completed {
        report: RunReport,
        source: PathBuf,
        resumed: bool,
    },
    Skipped {
        project: String,
        reason: String,
    },
    Failed {
        project: String,
        error: String,
    },
}

impl ProjectOutcome {
    pub fn project(&self) -> &str {
        match self {
            ProjectOutcome::Completed { report, .. } => &report.project,
            ProjectOutcome::Skipped { project, .. } | ProjectOutcome::Failed { project, .. } => {
                project
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub model: String,
    pub outcomes: Vec<ProjectOutcome>,
    /// RFC 3339 completion time
    pub finished_at: String,
}

impl BatchReport {
    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, ProjectOutcome::Completed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ProjectOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ProjectOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ProjectOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Summarize every requested project, in request order.
pub fn run_batch(
    oracle: &dyn SummaryOracle,
    storage: &StorageConfig,
    workspace_root: &Path,
    request: &SummarizeRequest,
) -> BatchReport {
    info!(
        projects = request.projects.len(),
        model = %request.model,
        "Starting batch"
    );

    let outcomes = request
        .projects
        .iter()
        .map(|project| {
            let paths = storage.run_paths(workspace_root, project, &request.model);
            run_project(oracle, paths, request)
        })
        .collect();

    let report = BatchReport {
        model: request.model.clone(),
        outcomes,
        finished_at: chrono::Utc::now().to_rfc3339(),
    };
    info!(
        completed = report.completed(),
        skipped = report.skipped(),
        failed = report.failed(),
        "Batch finished"
    );
    report
}

fn run_project(
    oracle: &dyn SummaryOracle,
    paths: RunPaths,
    request: &SummarizeRequest,
) -> ProjectOutcome {
    let project = paths.project.clone();
    let (source, resumed) = select_source(&paths, request.resume);

    let mut root = match load_tree(&source) {
        Ok(root) => root,
        Err(StorageError::NotFound(path)) => {
            error!(project = %project, path = %path.display(), "Input tree not found, skipping project");
            return ProjectOutcome::Skipped {
                project,
                reason: format!("input tree not found: {}", path.display()),
            };
        }
        Err(e) => {
            error!(project = %project, error = %e, "Failed to load input tree");
            return ProjectOutcome::Failed {
                project,
                error: e.to_string(),
            };
        }
    };

    let run_config = RunConfig {
        project: project.clone(),
        model: request.model.clone(),
        token_budget: request.token_budget,
        example_prompt: request.example_prompt.clone(),
        excluded_names: request.excluded_names.clone(),
    };
    let checkpointer = FileCheckpointer::new(paths, request.checkpoint_mode);
    let summarizer = BottomUpSummarizer::new(oracle, &run_config, &checkpointer);

    match summarizer.run(&mut root) {
        Ok(report) => ProjectOutcome::Completed {
            report,
            source,
            resumed,
        },
        Err(e) => {
            error!(project = %project, error = %e, "Summarization run aborted");
            ProjectOutcome::Failed {
                project,
                error: e.to_string(),
            }
        }
    }
}

/// Pick the document a run starts from: the existing output when resuming, else the input tree.
fn select_source(paths: &RunPaths, resume: bool) -> (PathBuf, bool) {
    if resume {
        let output = paths.output_tree();
        if output.exists() {
            info!(project = %paths.project, path = %output.display(), "Resuming from checkpoint");
            return (output, true);
        }
        warn!(project = %paths.project, "No checkpoint to resume from, starting from input tree");
    }
    (paths.input_tree(), false)
}

/// Load the tree a report command inspects: the run output when a model is
/// given, the input tree otherwise.
pub fn load_project_tree(
    storage: &StorageConfig,
    workspace_root: &Path,
    project: &str,
    model: Option<&str>,
) -> Result<(Node, PathBuf), ApiError> {
    let path = match model {
        Some(model) => storage.run_paths(workspace_root, project, model).output_tree(),
        None => storage.run_paths(workspace_root, project, "").input_tree(),
    };
    let root = load_tree(&path)?;
    Ok((root, path))
}
