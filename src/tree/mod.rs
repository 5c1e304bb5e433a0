//! Project Tree
//!
//! In-memory representation of a project: directories and files with their
//! extracted code, code elements, and derived summaries. Each node exclusively
//! owns its children, so the tree is finite and acyclic by construction.

pub mod collect;
pub mod levels;
pub mod node;

pub use collect::{collect_summaries, summary_map, SummaryEntry};
pub use levels::{
    level_stats, partition_addresses, partition_levels, LevelPartition, LevelStats, NodeAddress,
};
pub use node::Node;
