//! API route handlers exposing the browsing session.
//!
//! - `tree`: snapshot, load, refresh, branch switch, folder toggle, stats
//! - `events`: server-sent view-change events

pub mod events;
pub mod tree;

use axum::Router;

use crate::browser::RepoBrowser;

pub fn create_router(browser: RepoBrowser) -> Router {
    Router::new()
        .merge(tree::routes(browser.clone()))
        .merge(events::routes(browser))
}
