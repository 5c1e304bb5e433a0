use crate::integration::support::{sample_project, write_input, RecordingOracle};
use arbor::config::StorageConfig;
use arbor::store::{load_tree, CheckpointMode, FileCheckpointer};
use arbor::summarize::{BottomUpSummarizer, RunConfig};
use arbor::tokens::INPUT_TOKEN_BUDGET;
use arbor::tooling::{run_batch, ProjectOutcome, SummarizeRequest};
use std::path::Path;
use tempfile::TempDir;

const MODELS_SUMMARY: &str = "S(S(class A: ...)\nS(class B: ...))";

fn request(projects: &[&str], mode: CheckpointMode, resume: bool) -> SummarizeRequest {
    SummarizeRequest {
        projects: projects.iter().map(|p| p.to_string()).collect(),
        model: "test-model".to_string(),
        token_budget: INPUT_TOKEN_BUDGET,
        checkpoint_mode: mode,
        resume,
        example_prompt: "Example".to_string(),
        excluded_names: vec!["__init__.py".to_string()],
    }
}

fn output(workspace: &Path, project: &str) -> std::path::PathBuf {
    StorageConfig::default()
        .run_paths(workspace, project, "test-model")
        .output_tree()
}

#[test]
fn summarizes_whole_project_bottom_up() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "proj", &sample_project());
    let oracle = RecordingOracle::default();

    let report = run_batch(
        &oracle,
        &StorageConfig::default(),
        temp.path(),
        &request(&["proj"], CheckpointMode::Overwrite, false),
    );
    assert_eq!(report.completed(), 1);

    let root = load_tree(&output(temp.path(), "proj")).unwrap();
    let pkg = &root.children[0];
    let init = &pkg.children[0];
    let models = &pkg.children[1];
    let main = &root.children[1];

    assert!(init.summary.is_empty());
    assert_eq!(
        models.code_element_summaries,
        vec!["S(class A: ...)", "S(class B: ...)"]
    );
    assert_eq!(models.summary, MODELS_SUMMARY);
    assert_eq!(pkg.summary, format!("S({})", MODELS_SUMMARY));
    assert_eq!(main.summary, "S(print('hi'))");
    assert_eq!(
        root.summary,
        format!("S({}\n{})", pkg.summary, main.summary)
    );

    let calls = oracle.calls.borrow();
    assert_eq!(calls.len(), 6);
    assert_eq!(calls[0], "class A: ...");
    assert_eq!(calls.last().unwrap(), &format!("{}\n{}", pkg.summary, main.summary));
}

#[test]
fn per_level_checkpoints_grow_monotonically() {
    let temp = TempDir::new().unwrap();
    let storage = StorageConfig::default();
    let paths = storage.run_paths(temp.path(), "proj", "test-model");
    let checkpointer = FileCheckpointer::new(paths.clone(), CheckpointMode::PerLevel);
    let oracle = RecordingOracle::default();
    let config = RunConfig::new("proj", "test-model");
    let mut root = sample_project();

    let report = BottomUpSummarizer::new(&oracle, &config, &checkpointer)
        .run(&mut root)
        .unwrap();
    assert_eq!(report.checkpoints_written, 3);

    let deepest = load_tree(&paths.level_checkpoint(2)).unwrap();
    assert_eq!(deepest.children[0].children[1].summary, MODELS_SUMMARY);
    assert!(deepest.children[1].summary.is_empty());
    assert!(deepest.summary.is_empty());

    let middle = load_tree(&paths.level_checkpoint(1)).unwrap();
    assert!(!middle.children[1].summary.is_empty());
    assert!(middle.summary.is_empty());

    let top = load_tree(&paths.level_checkpoint(0)).unwrap();
    assert_eq!(top, root);
    assert_eq!(load_tree(&paths.output_tree()).unwrap(), root);
}

#[test]
fn oracle_failure_leaves_node_empty_and_run_completes() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "proj", &sample_project());
    let oracle = RecordingOracle::failing_on(&["print('hi')"]);

    let report = run_batch(
        &oracle,
        &StorageConfig::default(),
        temp.path(),
        &request(&["proj"], CheckpointMode::Overwrite, false),
    );
    match &report.outcomes[0] {
        ProjectOutcome::Completed { report, .. } => assert_eq!(report.oracle_failures, 1),
        other => panic!("unexpected outcome: {:?}", other),
    }

    let root = load_tree(&output(temp.path(), "proj")).unwrap();
    assert!(root.children[1].summary.is_empty());
    assert_eq!(root.summary, format!("S({})", root.children[0].summary));
}

#[test]
fn resume_skips_completed_nodes() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "proj", &sample_project());
    let storage = StorageConfig::default();

    let first = RecordingOracle::default();
    run_batch(
        &first,
        &storage,
        temp.path(),
        &request(&["proj"], CheckpointMode::Overwrite, false),
    );
    let finished = load_tree(&output(temp.path(), "proj")).unwrap();

    let second = RecordingOracle::default();
    let report = run_batch(
        &second,
        &storage,
        temp.path(),
        &request(&["proj"], CheckpointMode::Overwrite, true),
    );

    assert_eq!(second.call_count(), 0);
    match &report.outcomes[0] {
        ProjectOutcome::Completed { resumed, report, .. } => {
            assert!(*resumed);
            assert_eq!(report.nodes_summarized, 0);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(load_tree(&output(temp.path(), "proj")).unwrap(), finished);
}

#[test]
fn resume_continues_partial_checkpoint() {
    let temp = TempDir::new().unwrap();
    let storage = StorageConfig::default();
    write_input(temp.path(), "proj", &sample_project());

    // A checkpoint taken after the deepest level only
    let mut partial = sample_project();
    partial.children[0].children[1].summary = "Models.".to_string();
    arbor::store::save_tree(&partial, &output(temp.path(), "proj")).unwrap();

    let oracle = RecordingOracle::default();
    run_batch(
        &oracle,
        &storage,
        temp.path(),
        &request(&["proj"], CheckpointMode::Overwrite, true),
    );

    let calls = oracle.calls.borrow();
    assert_eq!(*calls, vec!["Models.", "print('hi')", "S(Models.)\nS(print('hi'))"]);
}

#[test]
fn batch_skips_missing_project_without_writing() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "present", &sample_project());
    let oracle = RecordingOracle::default();

    let report = run_batch(
        &oracle,
        &StorageConfig::default(),
        temp.path(),
        &request(&["missing", "present"], CheckpointMode::Overwrite, false),
    );

    assert_eq!(report.skipped(), 1);
    assert_eq!(report.completed(), 1);
    assert!(matches!(
        &report.outcomes[0],
        ProjectOutcome::Skipped { project, .. } if project == "missing"
    ));
    assert!(!output(temp.path(), "missing").exists());
    assert!(output(temp.path(), "present").exists());
}
