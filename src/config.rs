//! Runtime settings for the browser session and its HTTP clients.

use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_AVATAR_URL: &str = "https://github.com/identicons/default.png";
pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_STAGGER_MS: u64 = 200;
pub const USER_AGENT: &str = concat!("repo-browser/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Base URL of the repository backend, including the `/api` prefix.
    pub backend_url: String,
    pub github_api_url: String,
    pub github_token: Option<String>,
    /// Files annotated per batch.
    pub batch_size: usize,
    /// Delay between consecutive requests inside one batch.
    pub stagger: Duration,
    /// Avatar used when no user is known.
    pub default_avatar_url: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_token: None,
            batch_size: DEFAULT_BATCH_SIZE,
            stagger: Duration::from_millis(DEFAULT_STAGGER_MS),
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

impl BrowserConfig {
    /// Batch size of zero is treated as one.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}

/// Joins a base URL and a path without doubling or dropping slashes.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
