use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AppError, Result};

pub const DEFAULT_BRANCH: &str = "main";

/// The repository and branch a tree is built for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RepoRef {
    /// Parses `"owner/name"`.
    pub fn parse(full_name: &str, branch: impl Into<String>) -> Result<Self> {
        let (owner, repo) = full_name
            .trim()
            .split_once('/')
            .ok_or_else(|| AppError::InvalidRepo(format!(
                "expected \"owner/name\", got \"{}\"",
                full_name
            )))?;

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(AppError::InvalidRepo(format!(
                "expected \"owner/name\", got \"{}\"",
                full_name
            )));
        }

        let branch = branch.into();
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: if branch.is_empty() { DEFAULT_BRANCH.to_string() } else { branch },
        })
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn with_branch(&self, branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}
