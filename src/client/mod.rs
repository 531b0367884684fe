//! Collaborators the browser consumes over HTTP.
//!
//! - `RepoBackend`: content listing, per-file commit metadata and the legacy
//!   per-file commit list, all served by the repository backend
//! - `AvatarSource`: GitHub user lookup for committer avatars
//!
//! `HttpBackend` and `GitHubUsers` are the reqwest implementations. Tests and
//! embedders can substitute their own.

pub mod backend;
pub mod github;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FileInfoResponse, LegacyCommit, ListEntry, RepoRef};

pub use backend::HttpBackend;
pub use github::GitHubUsers;

#[async_trait]
pub trait RepoBackend: Send + Sync {
    /// Flat listing of the repository at `repo.branch`, optionally below `path`.
    async fn list_contents(&self, repo: &RepoRef, path: Option<&str>) -> Result<Vec<Option<ListEntry>>>;

    /// Latest commit touching `path`.
    async fn file_info(&self, repo: &RepoRef, path: &str) -> Result<FileInfoResponse>;

    /// Commits touching `path`, newest first.
    async fn file_commits(&self, repo: &RepoRef, path: &str) -> Result<Vec<LegacyCommit>>;
}

#[async_trait]
pub trait AvatarSource: Send + Sync {
    /// Avatar URL of a GitHub user; `Ok(None)` when the user has none or
    /// does not exist.
    async fn user_avatar(&self, username: &str) -> Result<Option<String>>;
}
