use arbor::error::OracleError;
use arbor::oracle::SummaryOracle;
use arbor::store::save_tree;
use arbor::tree::Node;
use std::cell::RefCell;
use std::path::Path;

/// Deterministic oracle: answers `S(<content>)`, failing for scripted contents.
#[derive(Default)]
pub struct RecordingOracle {
    pub calls: RefCell<Vec<String>>,
    pub failing: Vec<String>,
}

impl RecordingOracle {
    pub fn failing_on(contents: &[&str]) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failing: contents.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl SummaryOracle for RecordingOracle {
    fn summarize(&self, content: &str, _example: &str) -> Result<String, OracleError> {
        self.calls.borrow_mut().push(content.to_string());
        if self.failing.iter().any(|f| f == content) {
            return Err(OracleError::Status {
                code: 500,
                body: "scripted failure".to_string(),
            });
        }
        Ok(format!("S({})", content))
    }
}

/// proj/
///   pkg/
///     __init__.py
///     models.py   (two code elements)
///   main.py       (whole-file code)
pub fn sample_project() -> Node {
    Node::directory("proj", "/proj")
        .with_child(
            Node::directory("pkg", "/proj/pkg")
                .with_child(Node::file(
                    "__init__.py",
                    "/proj/pkg/__init__.py",
                    "from .models import *",
                    vec![],
                ))
                .with_child(Node::file(
                    "models.py",
                    "/proj/pkg/models.py",
                    "class A: ...\nclass B: ...",
                    vec!["class A: ...".to_string(), "class B: ...".to_string()],
                )),
        )
        .with_child(Node::file("main.py", "/proj/main.py", "print('hi')", vec![]))
}

pub fn write_input(workspace: &Path, project: &str, root: &Node) {
    save_tree(
        root,
        &workspace
            .join("project_tree")
            .join(format!("{}.json", project)),
    )
    .unwrap();
}
