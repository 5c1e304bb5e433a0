//! JSON persistence for project trees

use crate::error::StorageError;
use crate::tree::Node;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Serialize a tree as pretty-printed JSON with four-space indentation.
pub fn to_document_string(root: &Node) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    root.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write the whole tree to `destination`, creating missing parent directories.
///
/// The document is written to a sibling temporary file and renamed into place,
/// so readers never observe a partially written document.
pub fn save_tree(root: &Node, destination: &Path) -> Result<(), StorageError> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }

    let document =
        to_document_string(root).map_err(|e| StorageError::serialization(destination, e))?;

    let staging = staging_path(destination);
    fs::write(&staging, document).map_err(|e| StorageError::io(&staging, e))?;
    fs::rename(&staging, destination).map_err(|e| StorageError::io(destination, e))?;

    tracing::debug!(path = %destination.display(), "Tree saved");
    Ok(())
}

/// Load a tree document. A missing file is reported as [`StorageError::NotFound`].
pub fn load_tree(source: &Path) -> Result<Node, StorageError> {
    if !source.exists() {
        return Err(StorageError::NotFound(source.to_path_buf()));
    }
    let content = fs::read_to_string(source).map_err(|e| StorageError::io(source, e))?;
    serde_json::from_str(&content)
        .and_then(Node::from_document)
        .map_err(|e| StorageError::serialization(source, e))
}

fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tree() -> Node {
        let mut file = Node::file(
            "models.py",
            "/proj/app/models.py",
            "class Box:\n    pass\n",
            vec!["Class `Box`\nCode:\nclass Box:\n    pass".to_string()],
        );
        file.summary = "Defines a box — with ünïcode.".to_string();
        file.code_element_summaries = vec!["Class Box: an empty box.".to_string()];
        Node::directory("proj", "/proj")
            .with_child(Node::directory("app", "/proj/app").with_child(file))
            .with_child(Node::directory("empty", "/proj/empty"))
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dirs").join("tree.json");
        let tree = sample_tree();

        save_tree(&tree, &path).unwrap();
        let loaded = load_tree(&path).unwrap();

        assert_eq!(loaded, tree);
        assert!(!path.with_file_name("tree.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent.json");
        match load_tree(&missing) {
            Err(StorageError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_document_is_serialization_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "{\"name\": \"x\"").unwrap();
        assert!(matches!(
            load_tree(&path),
            Err(StorageError::Serialization { .. })
        ));
    }

    #[test]
    fn test_load_fills_missing_optional_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sparse.json");
        fs::write(
            &path,
            r#"{"name": "proj", "path": "/proj", "is_dir": true,
                "children": [{"name": "a.py", "path": "/proj/a.py", "is_dir": false}]}"#,
        )
        .unwrap();

        let root = load_tree(&path).unwrap();
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].code.is_empty());
        assert!(root.children[0].summary.is_empty());
        assert!(root.children[0].code_elements.is_empty());
    }

    #[test]
    fn test_repeated_saves_are_byte_stable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tree.json");
        let tree = sample_tree();

        save_tree(&tree, &path).unwrap();
        let first = fs::read(&path).unwrap();
        save_tree(&tree, &path).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_uses_four_space_indent_and_raw_utf8() {
        let text = to_document_string(&sample_tree()).unwrap();
        assert!(text.starts_with("{\n    \"name\": \"proj\""));
        assert!(text.contains("ünïcode"));
    }
}
