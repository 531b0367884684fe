//! Avatar cache shared by every annotation of a browser session.
//!
//! - Keyed by username, append-only until `clear()`
//! - Concurrent lookups for the same name wait on one `OnceCell`, so each
//!   name costs at most one request
//! - Lookups never fail: unknown users get the default identicon, failed
//!   lookups get the user's `github.com/{name}.png` URL

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::client::AvatarSource;
use crate::models::UNKNOWN_PUSHER;

pub struct AvatarCache {
    source: Arc<dyn AvatarSource>,
    default_avatar: String,
    entries: Mutex<HashMap<String, Arc<OnceCell<String>>>>,
}

impl AvatarCache {
    pub fn new(source: Arc<dyn AvatarSource>, default_avatar: impl Into<String>) -> Self {
        Self {
            source,
            default_avatar: default_avatar.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn default_avatar(&self) -> &str {
        &self.default_avatar
    }

    /// Avatar URL derived from the name alone.
    pub fn fallback_url(username: &str) -> String {
        format!("https://github.com/{}.png", username)
    }

    pub async fn resolve(&self, username: &str) -> String {
        let username = username.trim();
        if username.is_empty() || username == UNKNOWN_PUSHER {
            return self.default_avatar.clone();
        }

        let cell = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries
                .entry(username.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        cell.get_or_init(|| async {
            debug!("Fetching avatar for {}", username);
            match self.source.user_avatar(username).await {
                Ok(Some(url)) => url,
                Ok(None) => Self::fallback_url(username),
                Err(e) => {
                    warn!("Failed to fetch avatar for {}: {}", username, e);
                    Self::fallback_url(username)
                }
            }
        })
        .await
        .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AvatarSource for CountingSource {
        async fn user_avatar(&self, username: &str) -> Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            match username {
                "ghost" => Ok(None),
                "broken" => Err(AppError::Upstream { status: 500, url: "http://gh".into() }),
                other => Ok(Some(format!("https://avatars.example/{other}"))),
            }
        }
    }

    fn cache() -> (Arc<CountingSource>, AvatarCache) {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
        let cache = AvatarCache::new(source.clone(), "https://default.example/avatar.png");
        (source, cache)
    }

    #[tokio::test]
    async fn test_same_name_fetched_once() {
        let (source, cache) = cache();

        let (a, b) = tokio::join!(cache.resolve("alice"), cache.resolve("alice"));
        let c = cache.resolve(" alice ").await;

        assert_eq!(a, "https://avatars.example/alice");
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_uses_default_without_request() {
        let (source, cache) = cache();

        assert_eq!(cache.resolve(UNKNOWN_PUSHER).await, "https://default.example/avatar.png");
        assert_eq!(cache.resolve("  ").await, "https://default.example/avatar.png");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_missing_or_failed_lookup_falls_back_and_is_cached() {
        let (source, cache) = cache();

        assert_eq!(cache.resolve("ghost").await, "https://github.com/ghost.png");
        assert_eq!(cache.resolve("broken").await, "https://github.com/broken.png");
        assert_eq!(cache.resolve("broken").await, "https://github.com/broken.png");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let (source, cache) = cache();

        cache.resolve("alice").await;
        cache.clear();
        cache.resolve("alice").await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
