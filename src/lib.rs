//! Arbor: Hierarchical Bottom-Up Code Summarization
//!
//! Loads a project tree (directories and files with extracted code elements),
//! summarizes it level by level from the deepest nodes up to the root using an
//! LLM provider, and checkpoints the whole tree after every level.

pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod oracle;
pub mod provider;
pub mod store;
pub mod summarize;
pub mod tokens;
pub mod tooling;
pub mod tree;
pub mod types;
