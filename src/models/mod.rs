//! Data transfer objects shared by the tree builder, annotator and API.
//!
//! - `entry`: ListEntry, one record of the backend content listing
//! - `node`: FileNode, NodeKind, CommitFields and the placeholder strings
//! - `commit`: metadata / legacy commit / GitHub user responses
//! - `repo`: RepoRef (owner, name, branch)

pub mod commit;
pub mod entry;
pub mod node;
pub mod repo;

pub use commit::*;
pub use entry::*;
pub use node::*;
pub use repo::*;
