//! Repository tree browser.
//!
//! Turns a flat GitHub-style content listing into a sorted folder tree and
//! annotates every file with its latest commit in staggered batches.

pub mod annotate;
pub mod browser;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod tree;
