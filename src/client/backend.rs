use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::RepoBackend;
use crate::config::{join_url, BrowserConfig, USER_AGENT};
use crate::error::{AppError, Result};
use crate::models::{decode_listing, FileInfoResponse, LegacyCommit, ListEntry, RepoRef};

/// Repository backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BrowserConfig) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, &config.backend_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = join_url(&self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RepoBackend for HttpBackend {
    async fn list_contents(&self, repo: &RepoRef, path: Option<&str>) -> Result<Vec<Option<ListEntry>>> {
        let mut query = vec![
            ("owner", repo.owner.as_str()),
            ("repo", repo.repo.as_str()),
            ("branch", repo.branch.as_str()),
        ];
        if let Some(p) = path.filter(|p| !p.is_empty()) {
            query.push(("path", p));
        }

        let values: Vec<serde_json::Value> = self.get_json("contents", &query).await?;
        Ok(decode_listing(values))
    }

    async fn file_info(&self, repo: &RepoRef, path: &str) -> Result<FileInfoResponse> {
        let endpoint = format!("github/metadata/{}/{}/file-info", repo.owner, repo.repo);
        self.get_json(&endpoint, &[("path", path), ("ref", repo.branch.as_str())])
            .await
    }

    async fn file_commits(&self, repo: &RepoRef, path: &str) -> Result<Vec<LegacyCommit>> {
        let endpoint = format!("repos/{}/{}/commits", repo.owner, repo.repo);
        self.get_json(&endpoint, &[("branch", repo.branch.as_str()), ("path", path)])
            .await
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
