//! Browsing session: ties listing, tree building, annotation and the store.
//!
//! `load` returns as soon as the tree is built; annotation continues in a
//! background task whose handle is the completion signal.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::info;

use crate::annotate::{AnnotationReport, AnnotationTarget, Annotator, AvatarCache};
use crate::browser::notify::{ChangeNotifier, ViewEvent};
use crate::browser::store::{TreeSnapshot, TreeStore};
use crate::client::{AvatarSource, GitHubUsers, HttpBackend, RepoBackend};
use crate::config::BrowserConfig;
use crate::error::{AppError, Result};
use crate::models::RepoRef;
use crate::tree::{build_tree, reset_open_state, tree_stats, TreeStats};

/// A freshly built tree plus the handle of its running annotation.
pub struct LoadedTree {
    pub snapshot: TreeSnapshot,
    pub annotation: JoinHandle<AnnotationReport>,
}

#[derive(Clone)]
pub struct RepoBrowser {
    backend: Arc<dyn RepoBackend>,
    avatars: Arc<AvatarCache>,
    store: TreeStore,
    notifier: ChangeNotifier,
    annotator: Annotator,
}

impl RepoBrowser {
    pub fn new(
        backend: Arc<dyn RepoBackend>,
        avatar_source: Arc<dyn AvatarSource>,
        config: &BrowserConfig,
    ) -> Self {
        let avatars = Arc::new(AvatarCache::new(avatar_source, config.default_avatar_url.clone()));
        let store = TreeStore::new();
        let notifier = ChangeNotifier::default();
        let annotator = Annotator::new(
            backend.clone(),
            avatars.clone(),
            store.clone(),
            notifier.clone(),
            config,
        );

        Self {
            backend,
            avatars,
            store,
            notifier,
            annotator,
        }
    }

    /// Session talking to the configured backend and GitHub over HTTP.
    pub fn from_config(config: &BrowserConfig) -> Result<Self> {
        let backend = Arc::new(HttpBackend::new(config)?);
        let users = Arc::new(GitHubUsers::new(config)?);
        Ok(Self::new(backend, users, config))
    }

    /// Lists the repository, rebuilds the tree and starts annotating it.
    /// A listing failure leaves the current tree untouched.
    pub async fn load(&self, repo: RepoRef) -> Result<LoadedTree> {
        info!("Loading tree for {}", repo);
        let entries = self.backend.list_contents(&repo, None).await?;

        let mut root = build_tree(&entries);
        reset_open_state(&mut root);
        info!("Built tree for {} with {} top-level items", repo, root.children().len());

        let generation = self.store.replace(repo.clone(), root)?;
        self.notifier.notify(ViewEvent::TreeRebuilt { generation });
        let snapshot = self.store.snapshot()?;

        let annotator = self.annotator.clone();
        let annotation = tokio::spawn(async move {
            annotator
                .annotate(AnnotationTarget { repo, generation })
                .await
        });

        Ok(LoadedTree { snapshot, annotation })
    }

    /// Reloads the current repository with a fresh avatar cache.
    pub async fn refresh(&self) -> Result<LoadedTree> {
        let repo = self.current_repo()?;
        self.avatars.clear();
        self.load(repo).await
    }

    pub async fn select_branch(&self, branch: &str) -> Result<LoadedTree> {
        let repo = self.current_repo()?;
        self.load(repo.with_branch(branch)).await
    }

    pub fn toggle(&self, path: &str) -> Result<TreeSnapshot> {
        let open = self.store.toggle(path)?;
        let snapshot = self.store.snapshot()?;
        self.notifier.notify(ViewEvent::FolderToggled {
            generation: snapshot.generation,
            path: path.to_string(),
            open,
        });
        Ok(snapshot)
    }

    pub fn snapshot(&self) -> Result<TreeSnapshot> {
        self.store.snapshot()
    }

    pub fn stats(&self) -> Result<TreeStats> {
        self.store.with_root(tree_stats)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.notifier.subscribe()
    }

    fn current_repo(&self) -> Result<RepoRef> {
        self.store.repo()?.ok_or(AppError::NoRepository)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
