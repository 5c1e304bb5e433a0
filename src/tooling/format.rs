//! Format level reports, batch results, index exports and provider checks as text.

use crate::index::IndexExport;
use crate::provider::ValidationResult;
use crate::tooling::batch::{BatchReport, ProjectOutcome};
use crate::tree::LevelStats;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_level_report(project: &str, source: &Path, stats: &[LevelStats]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Levels: {}", project))
    ));
    out.push_str(&format!("  Source: {}\n", source.display()));
    out.push_str(&format!("  Max depth: {}\n\n", stats.len().saturating_sub(1)));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Level", "Nodes", "Files", "Directories", "Summarized"]);
    for row in stats {
        table.add_row(vec![
            row.level.to_string(),
            row.nodes.to_string(),
            row.files.to_string(),
            row.directories.to_string(),
            row.summarized.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));

    let nodes: usize = stats.iter().map(|s| s.nodes).sum();
    let summarized: usize = stats.iter().map(|s| s.summarized).sum();
    out.push_str(&format!("\nSummarized: {}/{} nodes\n", summarized, nodes));
    out
}

pub fn format_batch_report(report: &BatchReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Summarization ({})", report.model))
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "Project",
        "Status",
        "Summarized",
        "Budget skips",
        "Failures",
        "Levels",
    ]);
    for outcome in &report.outcomes {
        match outcome {
            ProjectOutcome::Completed {
                report, resumed, ..
            } => {
                let status = if *resumed { "resumed" } else { "completed" };
                table.add_row(vec![
                    report.project.clone(),
                    status.to_string(),
                    report.nodes_summarized.to_string(),
                    report.budget_skips.to_string(),
                    report.oracle_failures.to_string(),
                    report.levels_processed.to_string(),
                ]);
            }
            ProjectOutcome::Skipped { project, .. } => {
                table.add_row(vec![project.as_str(), "skipped", "-", "-", "-", "-"]);
            }
            ProjectOutcome::Failed { project, .. } => {
                table.add_row(vec![project.as_str(), "failed", "-", "-", "-", "-"]);
            }
        }
    }
    out.push_str(&format!("{}\n", table));

    let notes: Vec<String> = report
        .outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            ProjectOutcome::Skipped { project, reason } => {
                Some(format!("  {}: {}", project, reason))
            }
            ProjectOutcome::Failed { project, error } => Some(format!("  {}: {}", project, error)),
            ProjectOutcome::Completed { .. } => None,
        })
        .collect();
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(&notes.join("\n"));
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{} completed, {} skipped, {} failed\n",
        report.completed(),
        report.skipped(),
        report.failed()
    ));
    out
}

pub fn format_index_export(project: &str, export: &IndexExport) -> String {
    format!(
        "Exported {} summaries for {}\n  Paths: {}\n  Summaries: {}\n  Summary map: {}\n",
        export.entries,
        project,
        export.paths_file.display(),
        export.summaries_file.display(),
        export.summary_map_file.display()
    )
}

pub fn format_provider_validation(result: &ValidationResult, verbose: bool) -> String {
    let mut output = format!("Validating provider: {}\n\n", result.provider_name);

    for (description, passed) in &result.checks {
        let mark = if *passed { "ok" } else { "FAIL" };
        output.push_str(&format!("  [{}] {}\n", mark, description));
    }
    if !result.errors.is_empty() {
        output.push('\n');
        for error in &result.errors {
            output.push_str(&format!("  error: {}\n", error));
        }
    }
    output.push('\n');

    if result.is_valid() {
        output.push_str(&format!(
            "Validation passed: {}/{} checks\n",
            result.passed_checks(),
            result.checks.len()
        ));
    } else {
        output.push_str(&format!(
            "Validation failed: {} error(s)\n",
            result.errors.len()
        ));
    }
    if verbose {
        output.push_str(&format!(
            "Validation summary: {}/{} checks passed\n",
            result.passed_checks(),
            result.checks.len()
        ));
    }
    output
}
