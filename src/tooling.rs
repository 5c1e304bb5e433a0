//! Tooling & Integration Layer
//!
//! CLI commands, batch orchestration over several projects, and text
//! rendering of run reports.

pub mod batch;
pub mod cli;
pub mod format;

pub use batch::{run_batch, BatchReport, ProjectOutcome, SummarizeRequest};
pub use cli::{Cli, CliContext, Commands};
