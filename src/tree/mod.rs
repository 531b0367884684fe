pub mod builder;
pub mod collate;
pub mod render;
pub mod repair;
pub mod stats;

pub use builder::{build_tree, reset_open_state, sort_children};
pub use collate::locale_cmp;
pub use render::render_tree;
pub use stats::{tree_stats, FileTypeStat, TreeStats};
