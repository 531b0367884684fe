//! Commit metadata DTOs consumed from the backend and GitHub.
//!
//! - `FileInfoResponse` / `LatestCommit`: metadata endpoint (primary source)
//! - `LegacyCommit`: one element of the per-file commit list (fallback source)
//! - `GitHubUser`: the subset of `GET /users/{name}` used for avatars

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfoResponse {
    #[serde(default)]
    pub latest_commit: Option<LatestCommit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestCommit {
    #[serde(default)]
    pub commit_message: Option<String>,
    #[serde(default)]
    pub committer_name: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub commit_date: Option<String>,
    #[serde(default)]
    pub committer_email: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyCommit {
    #[serde(default)]
    pub commit: Option<LegacyCommitBody>,
    /// GitHub account of the author, when the backend forwards it.
    #[serde(default)]
    pub author: Option<GitHubAccount>,
    #[serde(default)]
    pub committer: Option<GitHubAccount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyCommitBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub author: Option<Signature>,
    #[serde(default)]
    pub committer: Option<Signature>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubAccount {
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubUser {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Treats empty strings like missing values.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
