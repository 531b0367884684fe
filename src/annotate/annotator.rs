//! Commit annotation of a built tree.
//!
//! File nodes are split into batches; inside a batch each request is
//! dispatched `stagger` after the previous one, and all batches start at
//! once. Each node runs as its own task:
//!
//! 1. metadata endpoint (`latestCommit`)
//! 2. legacy per-file commit list when 1 fails or has no commit
//! 3. sentinel values when 2 fails or is empty
//!
//! Results go through the generation-checked `TreeStore`; each applied update
//! emits one `ViewEvent::NodeUpdated`. Nothing here returns an error.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::annotate::avatar::AvatarCache;
use crate::annotate::batch::{dispatch_delay, file_paths, plan_batches};
use crate::browser::notify::{ChangeNotifier, ViewEvent};
use crate::browser::store::{ApplyOutcome, TreeStore};
use crate::client::RepoBackend;
use crate::config::BrowserConfig;
use crate::models::{
    non_empty, CommitFields, LatestCommit, LegacyCommit, RepoRef, COMMIT_FETCH_ERROR,
    INVALID_COMMIT_STRUCTURE, NO_COMMIT_HISTORY, NO_COMMIT_MESSAGE, UNKNOWN_PUSHER,
};

/// Which tree to annotate: the repository it was built from and the store
/// generation it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationTarget {
    pub repo: RepoRef,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationReport {
    pub total: usize,
    pub batches: usize,
    /// Nodes filled from the metadata endpoint.
    pub primary: usize,
    /// Nodes filled from the legacy commit list.
    pub fallback: usize,
    /// Nodes left with sentinel values.
    pub sentinel: usize,
    /// Updates dropped because the tree was rebuilt meanwhile.
    pub stale: usize,
    /// Updates whose path was no longer a file node of the current tree.
    pub missing: usize,
}

impl AnnotationReport {
    /// Tallies one finished node. `outcome` is `None` when the store could
    /// not be written at all.
    pub fn record(&mut self, source: CommitSource, outcome: Option<ApplyOutcome>) {
        match source {
            CommitSource::Primary => self.primary += 1,
            CommitSource::Fallback => self.fallback += 1,
            CommitSource::Sentinel => self.sentinel += 1,
        }
        match outcome {
            Some(ApplyOutcome::Stale) => self.stale += 1,
            Some(ApplyOutcome::Missing) => self.missing += 1,
            Some(ApplyOutcome::Applied) | None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitSource {
    Primary,
    Fallback,
    Sentinel,
}

#[derive(Clone)]
pub struct Annotator {
    backend: Arc<dyn RepoBackend>,
    avatars: Arc<AvatarCache>,
    store: TreeStore,
    notifier: ChangeNotifier,
    batch_size: usize,
    stagger: Duration,
}

impl Annotator {
    pub fn new(
        backend: Arc<dyn RepoBackend>,
        avatars: Arc<AvatarCache>,
        store: TreeStore,
        notifier: ChangeNotifier,
        config: &BrowserConfig,
    ) -> Self {
        Self {
            backend,
            avatars,
            store,
            notifier,
            batch_size: config.effective_batch_size(),
            stagger: config.stagger,
        }
    }

    /// Annotates every file node of the target tree and waits for all of them.
    pub async fn annotate(&self, target: AnnotationTarget) -> AnnotationReport {
        if !self.is_current(&target) {
            debug!("Not annotating {}: generation {} already replaced", target.repo, target.generation);
            return AnnotationReport::default();
        }

        let paths = match self.store.with_root(file_paths) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Cannot read tree for annotation: {}", e);
                return AnnotationReport::default();
            }
        };

        let total = paths.len();
        let batches = plan_batches(paths, self.batch_size);
        info!(
            "Annotating {} files of {} in {} batches",
            total,
            target.repo,
            batches.len()
        );

        let mut tasks = JoinSet::new();
        for (batch_index, batch) in batches.iter().enumerate() {
            debug!("Dispatching batch {}/{} with {} files", batch_index + 1, batches.len(), batch.len());
            for (index, path) in batch.iter().enumerate() {
                let annotator = self.clone();
                let target = target.clone();
                let path = path.clone();
                let delay = dispatch_delay(index, self.stagger);

                tasks.spawn(async move {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    annotator.annotate_file(&target, &path).await
                });
            }
        }

        let mut report = AnnotationReport {
            total,
            batches: batches.len(),
            ..Default::default()
        };

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some((source, outcome))) => report.record(source, outcome),
                Ok(None) => report.stale += 1,
                Err(e) => warn!("Annotation task failed: {}", e),
            }
        }

        info!(
            "Annotation of {} finished: {} primary, {} fallback, {} sentinel, {} stale, {} missing",
            target.repo, report.primary, report.fallback, report.sentinel, report.stale, report.missing
        );
        report
    }

    fn is_current(&self, target: &AnnotationTarget) -> bool {
        self.store.generation().ok() == Some(target.generation)
    }

    /// `None` when the tree was replaced before the request was sent.
    async fn annotate_file(
        &self,
        target: &AnnotationTarget,
        path: &str,
    ) -> Option<(CommitSource, Option<ApplyOutcome>)> {
        if !self.is_current(target) {
            debug!("Skipping {}: tree generation {} is gone", path, target.generation);
            return None;
        }

        let (source, fields) = self.resolve_commit(&target.repo, path).await;
        Some((source, self.publish(target.generation, path, &fields)))
    }

    /// Latest-commit data for one file, falling back as far as needed.
    pub async fn resolve_commit(&self, repo: &RepoRef, path: &str) -> (CommitSource, CommitFields) {
        match self.backend.file_info(repo, path).await {
            Ok(info) => match info.latest_commit {
                Some(latest) => return (CommitSource::Primary, self.from_latest(latest).await),
                None => debug!("No commit metadata found for {}", path),
            },
            Err(e) => warn!("Error fetching metadata for {}: {}", path, e),
        }

        self.fallback(repo, path).await
    }

    async fn from_latest(&self, latest: LatestCommit) -> CommitFields {
        let pusher_name = pusher_name(latest.committer_name.as_deref(), latest.author_name.as_deref());
        let pusher_avatar = self.avatars.resolve(&pusher_name).await;

        CommitFields {
            commit_message: non_empty(latest.commit_message.as_deref())
                .unwrap_or(NO_COMMIT_MESSAGE)
                .to_string(),
            pusher_name,
            pushed_at: latest.commit_date.unwrap_or_default(),
            pusher_email: non_empty(latest.committer_email.as_deref())
                .or(non_empty(latest.author_email.as_deref()))
                .map(str::to_string),
            pusher_avatar,
        }
    }

    async fn fallback(&self, repo: &RepoRef, path: &str) -> (CommitSource, CommitFields) {
        debug!("Falling back to commit list for {}", path);
        let sentinel = |message: &str| {
            (
                CommitSource::Sentinel,
                CommitFields::sentinel(message, self.avatars.default_avatar()),
            )
        };

        let commits = match self.backend.file_commits(repo, path).await {
            Ok(commits) => commits,
            Err(e) => {
                warn!("Error fetching commit list for {}: {}", path, e);
                return sentinel(COMMIT_FETCH_ERROR);
            }
        };

        let Some(LegacyCommit { commit, author, committer }) = commits.into_iter().next() else {
            debug!("No commits found for {}", path);
            return sentinel(NO_COMMIT_HISTORY);
        };
        let Some(body) = commit else {
            warn!("Commit for {} has no commit object", path);
            return sentinel(INVALID_COMMIT_STRUCTURE);
        };

        let committed = body.committer.unwrap_or_default();
        let authored = body.author.unwrap_or_default();

        let pusher_name = pusher_name(committed.name.as_deref(), authored.name.as_deref());
        let pusher_avatar = if pusher_name == UNKNOWN_PUSHER {
            self.avatars.default_avatar().to_string()
        } else {
            let login = author
                .and_then(|a| a.login)
                .filter(|l| !l.is_empty())
                .or_else(|| committer.and_then(|c| c.login).filter(|l| !l.is_empty()))
                .unwrap_or_else(|| pusher_name.clone());
            self.avatars.resolve(&login).await
        };

        let fields = CommitFields {
            commit_message: non_empty(body.message.as_deref())
                .unwrap_or(NO_COMMIT_MESSAGE)
                .to_string(),
            pusher_name,
            pushed_at: non_empty(committed.date.as_deref())
                .or(non_empty(authored.date.as_deref()))
                .unwrap_or_default()
                .to_string(),
            pusher_email: non_empty(committed.email.as_deref())
                .or(non_empty(authored.email.as_deref()))
                .map(str::to_string),
            pusher_avatar,
        };
        (CommitSource::Fallback, fields)
    }

    fn publish(&self, generation: u64, path: &str, fields: &CommitFields) -> Option<ApplyOutcome> {
        let outcome = match self.store.apply(generation, path, fields) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Failed to store annotation of {}: {}", path, e);
                return None;
            }
        };

        match outcome {
            ApplyOutcome::Applied => self.notifier.notify(ViewEvent::NodeUpdated {
                generation,
                path: path.to_string(),
            }),
            ApplyOutcome::Stale => {
                debug!("Discarding annotation of {} for stale generation {}", path, generation)
            }
            ApplyOutcome::Missing => {
                debug!("Discarding annotation of {}: not a file in generation {}", path, generation)
            }
        }
        Some(outcome)
    }
}

/// Committer name, else author name, else `"Unknown"`; trimmed.
pub fn pusher_name(committer: Option<&str>, author: Option<&str>) -> String {
    let name = non_empty(committer)
        .or(non_empty(author))
        .unwrap_or(UNKNOWN_PUSHER)
        .trim();
    if name.is_empty() {
        UNKNOWN_PUSHER.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
#[path = "annotator_tests.rs"]
mod tests;
