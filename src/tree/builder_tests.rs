use super::*;
use crate::models::ROOT_NAME;

fn entries(items: Vec<ListEntry>) -> Vec<Option<ListEntry>> {
    items.into_iter().map(Some).collect()
}

fn names(node: &FileNode) -> Vec<&str> {
    node.children().iter().map(|c| c.name.as_str()).collect()
}

fn assert_paths_follow_names(node: &FileNode, prefix: &str) {
    for child in node.children() {
        let expected = if prefix.is_empty() {
            child.name.clone()
        } else {
            format!("{}/{}", prefix, child.name)
        };
        assert_eq!(child.path, expected);
        assert_paths_follow_names(child, &child.path);
    }
}

fn assert_sorted(node: &FileNode) {
    let children = node.children();
    for pair in children.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        match (a.kind, b.kind) {
            (NodeKind::File, NodeKind::Folder) => panic!("file {} before folder {}", a.path, b.path),
            (x, y) if x == y => assert_ne!(locale_cmp(&a.name, &b.name), Ordering::Greater),
            _ => {}
        }
    }
    children.iter().for_each(assert_sorted);
}

fn assert_unique_names(node: &FileNode) {
    let mut seen = std::collections::HashSet::new();
    for child in node.children() {
        assert!(seen.insert(child.name.as_str()), "duplicate child {}", child.path);
        assert_unique_names(child);
    }
}

#[test]
fn test_empty_listing_yields_only_root() {
    let root = build_tree(&[]);
    assert_eq!(root.name, ROOT_NAME);
    assert_eq!(root.path, "");
    assert!(root.is_folder());
    assert!(root.is_open);
    assert!(root.children().is_empty());
}

#[test]
fn test_nested_example() {
    let root = build_tree(&entries(vec![
        ListEntry::file("a/b.txt"),
        ListEntry::file("a/c/d.txt"),
    ]));

    assert_eq!(names(&root), vec!["a"]);
    let a = &root.children()[0];
    assert!(a.is_folder());
    assert!(!a.is_open);
    assert_eq!(names(a), vec!["c", "b.txt"]);

    let c = &a.children()[0];
    assert!(c.is_folder());
    assert_eq!(c.path, "a/c");
    assert_eq!(names(c), vec!["d.txt"]);
    assert_eq!(c.children()[0].path, "a/c/d.txt");
    assert!(c.children()[0].children.is_none());
}

#[test]
fn test_structural_invariants_on_mixed_listing() {
    let root = build_tree(&entries(vec![
        ListEntry::file("Zeta.md"),
        ListEntry::file("alpha.md"),
        ListEntry::dir("src"),
        ListEntry::file("src/main.rs"),
        ListEntry::file("src/bin/tool.rs"),
        ListEntry::file("docs/Guide.md"),
        ListEntry::file("docs/api.md"),
        ListEntry::file("src/main.rs"),
        ListEntry::dir("assets"),
    ]));

    assert_paths_follow_names(&root, "");
    assert_sorted(&root);
    assert_unique_names(&root);
    assert_eq!(names(&root), vec!["assets", "docs", "src", "alpha.md", "Zeta.md"]);
    assert_eq!(names(root.find("docs").unwrap()), vec!["api.md", "Guide.md"]);
    assert_eq!(root.find("src").unwrap().children().len(), 2);
}

#[test]
fn test_dir_entry_becomes_empty_folder() {
    let root = build_tree(&entries(vec![ListEntry::dir("empty")]));
    let empty = root.find("empty").unwrap();
    assert!(empty.is_folder());
    assert_eq!(empty.children, Some(Vec::new()));
    assert_eq!(empty.commit_message, "");
}

#[test]
fn test_null_and_slash_only_entries_are_skipped() {
    let root = build_tree(&[None, Some(ListEntry::file("///")), Some(ListEntry::file("ok.txt"))]);
    assert_eq!(names(&root), vec!["ok.txt"]);
}

#[test]
fn test_entry_without_path_uses_name_then_unnamed() {
    let by_name = ListEntry {
        name: Some("LICENSE".into()),
        entry_type: Some("file".into()),
        ..Default::default()
    };
    let nameless = ListEntry {
        entry_type: Some("file".into()),
        ..Default::default()
    };
    let root = build_tree(&entries(vec![by_name, nameless]));
    assert_eq!(names(&root), vec!["LICENSE", "unnamed"]);
}

#[test]
fn test_file_fields_copied_and_repaired() {
    let entry = ListEntry {
        path: Some("docs/readme.md.md".into()),
        entry_type: Some("file".into()),
        html_url: Some("https://github.com/o/r/blob/main/docs/readme.md".into()),
        download_url: Some("https://raw.githubusercontent.com/o/r/main/docs/readme.md".into()),
        commit_message: Some("fixfix".into()),
        pusher_name: Some("bobbob".into()),
        pushed_at: Some("2024-03-01T12:00:00Z".into()),
        ..Default::default()
    };
    let root = build_tree(&entries(vec![entry]));
    let file = root.find("docs/readme.md").unwrap();

    assert_eq!(file.commit_message, "fix");
    assert_eq!(file.pusher_name, "bob");
    assert_eq!(file.pushed_at, "2024-03-01T12:00:00Z");
    assert_eq!(
        file.remote_url.as_deref(),
        Some("https://github.com/o/r/blob/main/docs/readme.md")
    );
    assert!(file.download_url.is_some());
}

#[test]
fn test_missing_commit_fields_use_placeholders() {
    let root = build_tree(&entries(vec![ListEntry::file("x.txt")]));
    let file = root.find("x.txt").unwrap();
    assert_eq!(file.commit_message, NO_COMMIT_MESSAGE);
    assert_eq!(file.pusher_name, UNKNOWN_PUSHER);
    assert_eq!(file.pushed_at, "");
}

#[test]
fn test_doubled_segment_is_normalized() {
    let root = build_tree(&entries(vec![ListEntry::file("testtest/file.txt")]));
    assert!(root.find("test/file.txt").is_some());
}

#[test]
fn test_repeated_entries_merge_and_first_wins() {
    let first = ListEntry {
        commit_message: Some("first".into()),
        ..ListEntry::file("a.txt")
    };
    let second = ListEntry {
        commit_message: Some("second".into()),
        ..ListEntry::file("a.txt")
    };
    let root = build_tree(&entries(vec![first, second]));
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0].commit_message, "first");
}

#[test]
fn test_file_promoted_when_descended_into() {
    let root = build_tree(&entries(vec![ListEntry::file("lib"), ListEntry::file("lib/mod.rs")]));
    let lib = root.find("lib").unwrap();
    assert!(lib.is_folder());
    assert_eq!(names(lib), vec!["mod.rs"]);
}

#[test]
fn test_build_is_idempotent() {
    let listing = entries(vec![
        ListEntry::file("b/z.txt"),
        ListEntry::file("a.txt"),
        ListEntry::dir("b/y"),
        ListEntry::file("b/y/x.txt"),
    ]);
    assert_eq!(build_tree(&listing), build_tree(&listing));
}

#[test]
fn test_siblings_follow_locale_order() {
    let root = build_tree(&entries(vec![
        ListEntry::file("404.html"),
        ListEntry::file("_config.yml"),
        ListEntry::file("\u{e9}clair.txt"),
        ListEntry::file("fig.txt"),
        ListEntry::dir("_posts"),
    ]));
    assert_eq!(
        names(&root),
        vec!["_posts", "_config.yml", "404.html", "\u{e9}clair.txt", "fig.txt"]
    );
}

#[test]
fn test_reset_open_state() {
    let mut root = build_tree(&entries(vec![ListEntry::file("a/b/c.txt")]));
    root.find_mut("a").unwrap().is_open = true;
    root.find_mut("a/b").unwrap().is_open = true;
    root.is_open = false;

    reset_open_state(&mut root);
    assert!(root.is_open);
    assert!(!root.find("a").unwrap().is_open);
    assert!(!root.find("a/b").unwrap().is_open);
}
