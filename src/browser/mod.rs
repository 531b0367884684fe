//! Browser state shared between the annotator and the API.
//!
//! - `store`: generation-tagged tree holder
//! - `notify`: view-change events (`ViewEvent`) over a broadcast channel
//! - `session`: `RepoBrowser`, the load / refresh / toggle entry point

pub mod notify;
pub mod session;
pub mod store;

pub use notify::{ChangeNotifier, ViewEvent};
pub use session::{LoadedTree, RepoBrowser};
pub use store::{ApplyOutcome, TreeSnapshot, TreeStore};
