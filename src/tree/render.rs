//! Plain-text rendering of a tree for the `tree` subcommand.

use chrono::{DateTime, Utc};

use crate::models::FileNode;

pub fn format_relative_time(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}

/// `pushedAt` as relative time; unparseable or empty dates render as-is.
pub fn relative_pushed_at(pushed_at: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(pushed_at) {
        Ok(date) => format_relative_time(date.timestamp(), now.timestamp()),
        Err(_) => pushed_at.to_string(),
    }
}

/// Indented listing; closed folders are still expanded unless
/// `respect_open_state` is set.
pub fn render_tree(root: &FileNode, now: DateTime<Utc>, respect_open_state: bool) -> String {
    fn render(node: &FileNode, depth: usize, now: DateTime<Utc>, respect: bool, out: &mut String) {
        for child in node.children() {
            let indent = "  ".repeat(depth);
            if child.is_folder() {
                out.push_str(&format!("{}{}/\n", indent, child.name));
                if child.is_open || !respect {
                    render(child, depth + 1, now, respect, out);
                }
            } else {
                let when = relative_pushed_at(&child.pushed_at, now);
                out.push_str(&format!(
                    "{}{}  {} | {}{}\n",
                    indent,
                    child.name,
                    child.commit_message,
                    child.pusher_name,
                    if when.is_empty() { String::new() } else { format!(", {}", when) }
                ));
            }
        }
    }

    let mut out = format!("{}/\n", root.name);
    render(root, 1, now, respect_open_state, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListEntry;
    use crate::tree::build_tree;

    #[test]
    fn test_format_relative_time() {
        assert_eq!(format_relative_time(1000, 1030), "just now");
        assert_eq!(format_relative_time(0, 60), "1 minute ago");
        assert_eq!(format_relative_time(0, 7200), "2 hours ago");
        assert_eq!(format_relative_time(0, 86400 * 3), "3 days ago");
        assert_eq!(format_relative_time(0, 31536000 * 2), "2 years ago");
    }

    #[test]
    fn test_relative_pushed_at() {
        let now = DateTime::parse_from_rfc3339("2024-01-02T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(relative_pushed_at("2024-01-01T00:00:00Z", now), "1 day ago");
        assert_eq!(relative_pushed_at("", now), "");
        assert_eq!(relative_pushed_at("yesterday", now), "yesterday");
    }

    #[test]
    fn test_render_tree() {
        let root = build_tree(&[
            Some(ListEntry::file("a/b.txt")),
            Some(ListEntry::file("top.md")),
        ]);
        let now = Utc::now();

        let full = render_tree(&root, now, false);
        assert_eq!(
            full,
            "root/\n  a/\n    b.txt  No commit message | Unknown\n  top.md  No commit message | Unknown\n"
        );

        let collapsed = render_tree(&root, now, true);
        assert_eq!(collapsed, "root/\n  a/\n  top.md  No commit message | Unknown\n");
    }
}
