//! Flat listing → nested `FileNode` tree.
//!
//! Entries are walked in order, their path segments repaired and inserted
//! under a synthetic root. Children are then sorted folders first, then by
//! name. Building never fails: malformed entries are skipped and the worst
//! case is a tree holding only the root.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{FileNode, ListEntry, NodeKind, NO_COMMIT_MESSAGE, UNKNOWN_PUSHER};
use crate::tree::collate::locale_cmp;
use crate::tree::repair::{repair_field, repair_segment};

pub fn build_tree(entries: &[Option<ListEntry>]) -> FileNode {
    let mut root = FileNode::root();

    for entry in entries.iter().flatten() {
        insert_entry(&mut root, entry);
    }

    sort_children(&mut root);
    root
}

fn insert_entry(root: &mut FileNode, entry: &ListEntry) {
    let raw_path = entry.effective_path();
    let segments: Vec<String> = raw_path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(repair_segment)
        .collect();

    if segments.is_empty() {
        debug!("Skipping entry without a usable path: {:?}", raw_path);
        return;
    }

    let is_dir = entry.is_dir();
    let last = segments.len() - 1;
    let mut current = root;

    for (i, segment) in segments.iter().enumerate() {
        if current.is_file() {
            debug!("Promoting {} to a folder to hold {}", current.path, raw_path);
            current.promote_to_folder();
        }

        let children = current.children.get_or_insert_with(Vec::new);
        let idx = match children.iter().position(|c| c.name == *segment) {
            Some(idx) => idx,
            None => {
                let path = segments[..=i].join("/");
                let node = if i == last && !is_dir {
                    file_node(segment, path, entry)
                } else {
                    FileNode::folder(segment.clone(), path)
                };
                children.push(node);
                children.len() - 1
            }
        };

        current = &mut children[idx];
    }
}

fn file_node(name: &str, path: String, entry: &ListEntry) -> FileNode {
    let mut node = FileNode::file(name, path);
    node.remote_url = entry.html_url.clone();
    node.download_url = entry.download_url.clone();
    node.commit_message = entry
        .commit_message
        .as_deref()
        .map(|m| repair_field("commit message", m))
        .unwrap_or_else(|| NO_COMMIT_MESSAGE.to_string());
    node.pusher_name = entry
        .pusher_name
        .as_deref()
        .map(|p| repair_field("pusher name", p))
        .unwrap_or_else(|| UNKNOWN_PUSHER.to_string());
    node.pushed_at = entry.pushed_at.clone().unwrap_or_default();
    node
}

/// Sort: folders first, then files, by name. Recurses into every folder.
pub fn sort_children(node: &mut FileNode) {
    let Some(children) = node.children.as_mut() else {
        return;
    };

    children.sort_by(|a, b| match (a.kind, b.kind) {
        (NodeKind::Folder, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Folder) => Ordering::Greater,
        _ => locale_cmp(&a.name, &b.name),
    });

    for child in children.iter_mut() {
        sort_children(child);
    }
}

/// Root open, every other folder closed.
pub fn reset_open_state(root: &mut FileNode) {
    fn close_all(node: &mut FileNode) {
        for child in node.children.iter_mut().flatten() {
            if child.is_folder() {
                child.is_open = false;
                close_all(child);
            }
        }
    }

    root.is_open = true;
    close_all(root);
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
