//! Node type and document conversion

use serde::{Deserialize, Serialize};

/// A directory or file in the project tree.
///
/// Field order is the document field order; serialization output is stable
/// for a fixed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Final path segment
    pub name: String,
    /// Unique identifier of the node within the tree
    pub path: String,
    pub is_dir: bool,
    /// Opaque code fragments extracted upstream (always empty for directories)
    #[serde(default)]
    pub code_elements: Vec<String>,
    /// Full file content (empty for directories)
    #[serde(default)]
    pub code: String,
    /// One-sentence summary; empty until computed
    #[serde(default)]
    pub summary: String,
    /// Per-fragment summaries in surviving fragment order
    #[serde(default)]
    pub code_element_summaries: Vec<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, path: impl Into<String>, is_dir: bool) -> Self {
        Node {
            name: name.into(),
            path: path.into(),
            is_dir,
            code_elements: Vec::new(),
            code: String::new(),
            summary: String::new(),
            code_element_summaries: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, true)
    }

    /// Create a file node with its full code and extracted elements.
    pub fn file(
        name: impl Into<String>,
        path: impl Into<String>,
        code: impl Into<String>,
        code_elements: Vec<String>,
    ) -> Self {
        let mut node = Self::new(name, path, false);
        node.code = code.into();
        node.code_elements = code_elements;
        node
    }

    /// Append a child, preserving insertion order.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Builder form of [`Node::add_child`].
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }

    /// Whether this node's name is one of the excluded marker names.
    pub fn is_excluded(&self, excluded_names: &[String]) -> bool {
        excluded_names.iter().any(|name| name == &self.name)
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Number of file nodes in this subtree.
    pub fn file_count(&self) -> usize {
        let own = usize::from(!self.is_dir);
        own + self.children.iter().map(Node::file_count).sum::<usize>()
    }

    /// Number of nodes in this subtree that carry a summary.
    pub fn summarized_count(&self) -> usize {
        let own = usize::from(self.has_summary());
        own + self
            .children
            .iter()
            .map(Node::summarized_count)
            .sum::<usize>()
    }

    /// Rebuild a node from the nested document representation.
    pub fn from_document(document: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(document)
    }
}
