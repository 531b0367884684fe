use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::client::AvatarSource;
use crate::config::{join_url, BrowserConfig, USER_AGENT};
use crate::error::{AppError, Result};
use crate::models::GitHubUser;

/// GitHub REST user lookups, used only for avatars.
#[derive(Debug, Clone)]
pub struct GitHubUsers {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubUsers {
    pub fn new(config: &BrowserConfig) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(
            client,
            &config.github_api_url,
            config.github_token.clone(),
        ))
    }

    pub fn with_client(client: Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn user_url(&self, username: &str) -> Result<Url> {
        let mut url = Url::parse(&join_url(&self.base_url, "users"))
            .map_err(|e| AppError::Internal(format!("Invalid GitHub API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Internal(format!("GitHub API URL cannot be a base: {}", self.base_url)))?
            .push(username);
        Ok(url)
    }
}

#[async_trait]
impl AvatarSource for GitHubUsers {
    async fn user_avatar(&self, username: &str) -> Result<Option<String>> {
        let url = self.user_url(username)?;
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let user = response.json::<GitHubUser>().await?;
        Ok(user.avatar_url.filter(|a| !a.is_empty()))
    }
}
