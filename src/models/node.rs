//! Reconstructed repository tree.
//!
//! - `FileNode`: one file or folder, with the latest-commit fields the
//!   annotator fills in after the tree is shown
//! - `NodeKind`: file/folder discriminator (`type` on the wire)
//! - `CommitFields`: one node update produced by the annotator
//!
//! Invariants kept by the constructors: only folders carry `children`,
//! only files carry remote/download URLs.

use serde::{Deserialize, Serialize};

pub const ROOT_NAME: &str = "root";
pub const NO_COMMIT_MESSAGE: &str = "No commit message";
pub const NO_COMMIT_HISTORY: &str = "No commit history";
pub const INVALID_COMMIT_STRUCTURE: &str = "Invalid commit structure";
pub const COMMIT_FETCH_ERROR: &str = "Error fetching commit info";
pub const UNKNOWN_PUSHER: &str = "Unknown";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    pub commit_message: String,
    pub pusher_name: String,
    pub pushed_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pusher_avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pusher_email: Option<String>,
}

impl FileNode {
    /// The synthetic root: empty path, always open.
    pub fn root() -> Self {
        let mut root = Self::folder(ROOT_NAME, "");
        root.is_open = true;
        root
    }

    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Folder,
            children: Some(Vec::new()),
            is_open: false,
            remote_url: None,
            download_url: None,
            commit_message: String::new(),
            pusher_name: String::new(),
            pushed_at: String::new(),
            pusher_avatar: None,
            pusher_email: None,
        }
    }

    /// A file node with placeholder commit data.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            children: None,
            is_open: false,
            remote_url: None,
            download_url: None,
            commit_message: NO_COMMIT_MESSAGE.to_string(),
            pusher_name: UNKNOWN_PUSHER.to_string(),
            pushed_at: String::new(),
            pusher_avatar: None,
            pusher_email: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn children(&self) -> &[FileNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Turns a file into an empty folder, keeping name and path.
    pub fn promote_to_folder(&mut self) {
        let name = std::mem::take(&mut self.name);
        let path = std::mem::take(&mut self.path);
        let is_open = self.is_open;
        *self = Self::folder(name, path);
        self.is_open = is_open;
    }

    pub fn find(&self, path: &str) -> Option<&FileNode> {
        if self.path == path {
            return Some(self);
        }
        self.children()
            .iter()
            .filter(|c| is_ancestor_or_self(&c.path, path))
            .find_map(|c| c.find(path))
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut FileNode> {
        if self.path == path {
            return Some(self);
        }
        self.children
            .as_mut()?
            .iter_mut()
            .filter(|c| is_ancestor_or_self(&c.path, path))
            .find_map(|c| c.find_mut(path))
    }

    pub fn apply(&mut self, fields: &CommitFields) {
        self.commit_message = fields.commit_message.clone();
        self.pusher_name = fields.pusher_name.clone();
        self.pushed_at = fields.pushed_at.clone();
        self.pusher_email = fields.pusher_email.clone();
        self.pusher_avatar = Some(fields.pusher_avatar.clone());
    }
}

fn is_ancestor_or_self(candidate: &str, path: &str) -> bool {
    path == candidate
        || (path.len() > candidate.len()
            && path.starts_with(candidate)
            && path.as_bytes()[candidate.len()] == b'/')
}

/// Latest-commit data for a single file node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommitFields {
    pub commit_message: String,
    pub pusher_name: String,
    pub pushed_at: String,
    pub pusher_email: Option<String>,
    pub pusher_avatar: String,
}

impl CommitFields {
    /// Placeholder data used when no real commit could be found.
    pub fn sentinel(message: &str, avatar: &str) -> Self {
        Self {
            commit_message: message.to_string(),
            pusher_name: UNKNOWN_PUSHER.to_string(),
            pushed_at: String::new(),
            pusher_email: None,
            pusher_avatar: avatar.to_string(),
        }
    }
}
