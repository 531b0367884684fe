//! Tree endpoints.
//!
//! - GET /api/v1/tree
//!   Current snapshot. Commit fields hold placeholders until annotated.
//!
//! - POST /api/v1/tree/load { repo: "owner/name", branch?: string }
//!   Lists and rebuilds the tree, then annotates it in the background.
//!
//! - POST /api/v1/tree/refresh
//!   Reloads the current repository with a cleared avatar cache.
//!
//! - POST /api/v1/tree/branch { branch: string }
//!
//! - POST /api/v1/tree/toggle { path: string }
//!   Opens or closes one folder.
//!
//! - GET /api/v1/tree/stats

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::browser::{LoadedTree, RepoBrowser, TreeSnapshot};
use crate::error::Result;
use crate::models::{RepoRef, DEFAULT_BRANCH};
use crate::tree::TreeStats;

pub fn routes(browser: RepoBrowser) -> Router {
    Router::new()
        .route("/api/v1/tree", get(get_tree))
        .route("/api/v1/tree/load", post(load_tree))
        .route("/api/v1/tree/refresh", post(refresh_tree))
        .route("/api/v1/tree/branch", post(select_branch))
        .route("/api/v1/tree/toggle", post(toggle_folder))
        .route("/api/v1/tree/stats", get(get_stats))
        .with_state(browser)
}

async fn get_tree(State(browser): State<RepoBrowser>) -> Result<Json<TreeSnapshot>> {
    Ok(Json(browser.snapshot()?))
}

#[derive(Debug, Deserialize)]
struct LoadRequest {
    repo: String,
    #[serde(default)]
    branch: Option<String>,
}

/// The annotation handle is detached; progress reaches clients as events.
fn respond(loaded: LoadedTree) -> Json<TreeSnapshot> {
    Json(loaded.snapshot)
}

async fn load_tree(
    State(browser): State<RepoBrowser>,
    Json(request): Json<LoadRequest>,
) -> Result<Json<TreeSnapshot>> {
    let branch = request.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string());
    let repo = RepoRef::parse(&request.repo, branch)?;
    Ok(respond(browser.load(repo).await?))
}

async fn refresh_tree(State(browser): State<RepoBrowser>) -> Result<Json<TreeSnapshot>> {
    Ok(respond(browser.refresh().await?))
}

#[derive(Debug, Deserialize)]
struct BranchRequest {
    branch: String,
}

async fn select_branch(
    State(browser): State<RepoBrowser>,
    Json(request): Json<BranchRequest>,
) -> Result<Json<TreeSnapshot>> {
    Ok(respond(browser.select_branch(&request.branch).await?))
}

#[derive(Debug, Deserialize)]
struct ToggleRequest {
    path: String,
}

async fn toggle_folder(
    State(browser): State<RepoBrowser>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<TreeSnapshot>> {
    Ok(Json(browser.toggle(&request.path)?))
}

async fn get_stats(State(browser): State<RepoBrowser>) -> Result<Json<TreeStats>> {
    Ok(Json(browser.stats()?))
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
