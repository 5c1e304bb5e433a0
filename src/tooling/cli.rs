//! CLI Tooling
//!
//! Command-line interface for summarization runs and the reports built on
//! their output. Every command is scoped to a workspace root, against which
//! the configured storage directories resolve.

use crate::config::{ArborConfig, ConfigLoader};
use crate::error::ApiError;
use crate::index::export_index;
use crate::logging::LoggingConfig;
use crate::oracle::{load_example_prompt, ProviderOracle};
use crate::provider::validate_provider;
use crate::store::CheckpointMode;
use crate::tooling::batch::{load_project_tree, run_batch, SummarizeRequest};
use crate::tooling::format::{
    format_batch_report, format_index_export, format_level_report, format_provider_validation,
};
use crate::tree::level_stats;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Arbor CLI - hierarchical summaries of source trees
#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Summarize project trees bottom-up with an LLM provider")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize one or more projects bottom-up
    Summarize {
        /// Project names; each reads `<tree_dir>/<project>.json`
        #[arg(required = true)]
        projects: Vec<String>,
        /// Model identifier (overrides provider.model)
        #[arg(long)]
        model: Option<String>,
        /// Input token budget per provider call
        #[arg(long)]
        budget: Option<usize>,
        /// Checkpoint mode (overwrite or per_level)
        #[arg(long)]
        checkpoint_mode: Option<CheckpointMode>,
        /// Continue from an existing output document
        #[arg(long)]
        resume: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the level partition of a project tree
    Levels {
        project: String,
        /// Inspect the summarized output for this model instead of the input tree
        #[arg(long)]
        model: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Export ordered path and summary lists from a summarized tree
    Index {
        project: String,
        /// Model identifier (defaults to provider.model)
        #[arg(long)]
        model: Option<String>,
    },
    /// Provider commands
    Provider {
        #[command(subcommand)]
        command: ProviderCommands,
    },
}

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// Validate the configured provider
    Check {
        /// Show validation summary
        #[arg(long)]
        verbose: bool,
    },
}

#[derive(Serialize)]
struct LevelReport<'a> {
    project: &'a str,
    source: &'a Path,
    levels: &'a [crate::tree::LevelStats],
}

/// CLI context: workspace root plus loaded configuration.
pub struct CliContext {
    workspace_root: PathBuf,
    config: ArborConfig,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::from_config(workspace_root, config))
    }

    pub fn from_config(workspace_root: PathBuf, config: ArborConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &ArborConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Summarize {
                projects,
                model,
                budget,
                checkpoint_mode,
                resume,
                format,
            } => self.handle_summarize(
                projects,
                model.as_deref(),
                *budget,
                *checkpoint_mode,
                *resume,
                format,
            ),
            Commands::Levels {
                project,
                model,
                format,
            } => self.handle_levels(project, model.as_deref(), format),
            Commands::Index { project, model } => self.handle_index(project, model.as_deref()),
            Commands::Provider { command } => match command {
                ProviderCommands::Check { verbose } => {
                    let result = validate_provider(&self.config.provider);
                    Ok(format_provider_validation(&result, *verbose))
                }
            },
        }
    }

    /// Build the batch request from config, overridden by per-run flags.
    pub fn summarize_request(
        &self,
        projects: &[String],
        model: &str,
        budget: Option<usize>,
        checkpoint_mode: Option<CheckpointMode>,
        resume: bool,
    ) -> Result<SummarizeRequest, ApiError> {
        let summarization = &self.config.summarization;
        let token_budget = budget.unwrap_or(summarization.input_token_budget);
        if token_budget == 0 {
            return Err(ApiError::InvalidArgument(
                "--budget must be positive".to_string(),
            ));
        }
        let example_prompt = load_example_prompt(
            summarization.example_prompt_path.as_deref(),
            &self.workspace_root,
        )?;

        Ok(SummarizeRequest {
            projects: projects.to_vec(),
            model: model.to_string(),
            token_budget,
            checkpoint_mode: checkpoint_mode.unwrap_or(summarization.checkpoint_mode),
            resume,
            example_prompt,
            excluded_names: summarization.excluded_names.clone(),
        })
    }

    fn handle_summarize(
        &self,
        projects: &[String],
        model: Option<&str>,
        budget: Option<usize>,
        checkpoint_mode: Option<CheckpointMode>,
        resume: bool,
        format: &str,
    ) -> Result<String, ApiError> {
        check_format(format)?;
        let mut provider = self.config.provider.clone();
        if let Some(model) = model {
            provider.model = model.to_string();
        }
        let oracle = ProviderOracle::from_config(&provider)?;
        let request =
            self.summarize_request(projects, oracle.model(), budget, checkpoint_mode, resume)?;

        let report = run_batch(
            &oracle,
            &self.config.storage,
            &self.workspace_root,
            &request,
        );
        if format == "json" {
            to_json(&report)
        } else {
            Ok(format_batch_report(&report))
        }
    }

    fn handle_levels(
        &self,
        project: &str,
        model: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        check_format(format)?;
        let (root, source) =
            load_project_tree(&self.config.storage, &self.workspace_root, project, model)?;
        let stats = level_stats(&root);
        if format == "json" {
            to_json(&LevelReport {
                project,
                source: &source,
                levels: &stats,
            })
        } else {
            Ok(format_level_report(project, &source, &stats))
        }
    }

    fn handle_index(&self, project: &str, model: Option<&str>) -> Result<String, ApiError> {
        let model = model.unwrap_or(&self.config.provider.model);
        let (root, _) = load_project_tree(
            &self.config.storage,
            &self.workspace_root,
            project,
            Some(model),
        )?;
        let paths = self
            .config
            .storage
            .run_paths(&self.workspace_root, project, model);
        let export = export_index(&root, &paths, &self.config.summarization.excluded_names)?;
        Ok(format_index_export(project, &export))
    }
}

fn check_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::InvalidArgument(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidArgument(format!("Failed to serialize output: {}", e)))
}
