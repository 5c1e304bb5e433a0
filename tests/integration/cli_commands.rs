use crate::integration::support::{sample_project, write_input};
use arbor::config::ArborConfig;
use arbor::error::{ApiError, StorageError};
use arbor::provider::ProviderType;
use arbor::store::save_tree;
use arbor::tooling::cli::{CliContext, Commands, ProviderCommands};
use std::fs;
use tempfile::TempDir;

fn context(temp: &TempDir) -> CliContext {
    let mut config = ArborConfig::default();
    config.provider.provider_type = ProviderType::Ollama;
    config.provider.model = "llama3".to_string();
    CliContext::from_config(temp.path().to_path_buf(), config)
}

#[test]
fn levels_reports_input_tree_as_json() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "proj", &sample_project());

    let output = context(&temp)
        .execute(&Commands::Levels {
            project: "proj".to_string(),
            model: None,
            format: "json".to_string(),
        })
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let levels = value["levels"].as_array().unwrap();
    assert_eq!(levels.len(), 3);
    assert_eq!(levels[1]["files"], 1);
    assert_eq!(levels[1]["directories"], 1);
    assert_eq!(levels[2]["nodes"], 2);
    assert_eq!(levels[0]["summarized"], 0);
}

#[test]
fn levels_for_missing_project_is_not_found() {
    let temp = TempDir::new().unwrap();
    let result = context(&temp).execute(&Commands::Levels {
        project: "ghost".to_string(),
        model: Some("llama3".to_string()),
        format: "text".to_string(),
    });
    assert!(matches!(
        result,
        Err(ApiError::Storage(StorageError::NotFound(_)))
    ));
}

#[test]
fn index_exports_aligned_lists_from_summarized_tree() {
    let temp = TempDir::new().unwrap();
    let mut root = sample_project();
    root.children[0].children[0].summary = "Init marker.".to_string();
    root.children[0].children[1].summary = "Models.".to_string();
    root.children[1].summary = "Entry point.".to_string();
    save_tree(
        &root,
        &temp.path().join("summaries").join("proj_summary_llama3.json"),
    )
    .unwrap();

    let output = context(&temp)
        .execute(&Commands::Index {
            project: "proj".to_string(),
            model: None,
        })
        .unwrap();
    assert!(output.contains("Exported 2 summaries"));

    let index_dir = temp.path().join("similarity_matrices");
    let paths: Vec<String> = serde_json::from_str(
        &fs::read_to_string(index_dir.join("proj_llama3_paths.json")).unwrap(),
    )
    .unwrap();
    let summaries: Vec<String> = serde_json::from_str(
        &fs::read_to_string(index_dir.join("proj_llama3_summaries.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(paths, vec!["/proj/pkg/models.py", "/proj/main.py"]);
    assert_eq!(summaries, vec!["Models.", "Entry point."]);

    let summary_map: std::collections::BTreeMap<String, String> = serde_json::from_str(
        &fs::read_to_string(index_dir.join("proj_llama3_summary_map.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(summary_map.len(), 3);
    assert_eq!(summary_map["/proj/pkg/__init__.py"], "Init marker.");
    assert_eq!(summary_map["/proj/main.py"], "Entry point.");
    assert!(output.contains("proj_llama3_summary_map.json"));
}

#[test]
fn provider_check_reports_local_provider_without_key() {
    let temp = TempDir::new().unwrap();
    let output = context(&temp)
        .execute(&Commands::Provider {
            command: ProviderCommands::Check { verbose: true },
        })
        .unwrap();
    assert!(output.contains("Validation passed"));
    assert!(output.contains("API key not required"));
}

#[test]
fn context_loads_workspace_config_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("arbor.toml"),
        "[summarization]\ninput_token_budget = 512\n\n[storage]\ntree_dir = \"trees\"\n",
    )
    .unwrap();

    let context = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    assert_eq!(context.config().summarization.input_token_budget, 512);
    assert_eq!(
        context.config().storage.tree_dir,
        std::path::PathBuf::from("trees")
    );
}

#[test]
fn explicit_config_file_must_exist() {
    let temp = TempDir::new().unwrap();
    let result = CliContext::new(
        temp.path().to_path_buf(),
        Some(temp.path().join("missing.toml")),
    );
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}
