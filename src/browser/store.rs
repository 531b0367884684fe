//! Generation-tagged holder of the current tree.
//!
//! Every rebuild replaces the whole tree and bumps the generation. Annotation
//! updates carry the generation they were started for and are dropped once
//! it is no longer current, so a slow request can never write into a newer
//! tree.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{CommitFields, FileNode, RepoRef};

struct TreeState {
    generation: u64,
    repo: Option<RepoRef>,
    root: FileNode,
    built_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSnapshot {
    pub generation: u64,
    pub repo: Option<RepoRef>,
    pub built_at: DateTime<Utc>,
    pub root: FileNode,
}

/// Result of writing commit data into the stored tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The tree was rebuilt after the update was started.
    Stale,
    /// The generation is current but the path is not a file node.
    Missing,
}

#[derive(Clone)]
pub struct TreeStore {
    inner: Arc<RwLock<TreeState>>,
}

impl TreeStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TreeState {
                generation: 0,
                repo: None,
                root: FileNode::root(),
                built_at: Utc::now(),
            })),
        }
    }

    fn read<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&TreeState) -> Result<T>,
    {
        let state = self.inner.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&state)
    }

    fn write<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut TreeState) -> Result<T>,
    {
        let mut state = self.inner.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&mut state)
    }

    /// Discards the previous tree and returns the new generation.
    pub fn replace(&self, repo: RepoRef, root: FileNode) -> Result<u64> {
        self.write(|state| {
            state.generation += 1;
            state.repo = Some(repo);
            state.root = root;
            state.built_at = Utc::now();
            Ok(state.generation)
        })
    }

    pub fn generation(&self) -> Result<u64> {
        self.read(|state| Ok(state.generation))
    }

    pub fn repo(&self) -> Result<Option<RepoRef>> {
        self.read(|state| Ok(state.repo.clone()))
    }

    /// Writes commit data into a file node of `generation`.
    pub fn apply(&self, generation: u64, path: &str, fields: &CommitFields) -> Result<ApplyOutcome> {
        self.write(|state| {
            if state.generation != generation {
                return Ok(ApplyOutcome::Stale);
            }
            match state.root.find_mut(path) {
                Some(node) if node.is_file() => {
                    node.apply(fields);
                    Ok(ApplyOutcome::Applied)
                }
                _ => Ok(ApplyOutcome::Missing),
            }
        })
    }

    /// Flips a folder open or closed; returns the new state.
    pub fn toggle(&self, path: &str) -> Result<bool> {
        self.write(|state| {
            let node = state
                .root
                .find_mut(path)
                .ok_or_else(|| AppError::PathNotFound(path.to_string()))?;
            if !node.is_folder() {
                return Err(AppError::NotAFolder(path.to_string()));
            }
            node.is_open = !node.is_open;
            Ok(node.is_open)
        })
    }

    pub fn snapshot(&self) -> Result<TreeSnapshot> {
        self.read(|state| {
            Ok(TreeSnapshot {
                generation: state.generation,
                repo: state.repo.clone(),
                built_at: state.built_at,
                root: state.root.clone(),
            })
        })
    }

    pub fn with_root<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&FileNode) -> T,
    {
        self.read(|state| Ok(f(&state.root)))
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}
