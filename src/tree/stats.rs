//! Repository statistics computed from a built tree (sidebar data).

use serde::Serialize;
use std::collections::HashMap;

use crate::models::FileNode;

pub const NO_EXTENSION: &str = "no extension";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub total_files: usize,
    pub total_folders: usize,
    pub file_types: Vec<FileTypeStat>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileTypeStat {
    pub extension: String,
    pub count: usize,
    pub percentage: f64,
}

/// Lower-cased text after the last dot; dotfiles without another dot count
/// as their own extension (`.gitignore` → `gitignore`).
pub fn file_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => "",
    }
}

pub fn tree_stats(root: &FileNode) -> TreeStats {
    fn walk(node: &FileNode, folders: &mut usize, extensions: &mut HashMap<String, usize>) {
        for child in node.children() {
            if child.is_folder() {
                *folders += 1;
                walk(child, folders, extensions);
            } else {
                let ext = file_extension(&child.name).to_lowercase();
                *extensions.entry(ext).or_insert(0) += 1;
            }
        }
    }

    let mut total_folders = 0;
    let mut extensions = HashMap::new();
    walk(root, &mut total_folders, &mut extensions);

    let total_files: usize = extensions.values().sum();

    let mut file_types: Vec<FileTypeStat> = extensions
        .into_iter()
        .map(|(extension, count)| FileTypeStat {
            extension: if extension.is_empty() {
                NO_EXTENSION.to_string()
            } else {
                extension
            },
            count,
            percentage: count as f64 * 100.0 / total_files as f64,
        })
        .collect();
    file_types.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.extension.cmp(&b.extension)));

    TreeStats {
        total_files,
        total_folders,
        file_types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListEntry;
    use crate::tree::build_tree;

    #[test]
    fn test_counts_and_extensions() {
        let listing: Vec<Option<ListEntry>> = [
            "src/main.rs",
            "src/lib.rs",
            "src/util/mod.RS",
            "README.md",
            "Makefile",
        ]
        .into_iter()
        .map(|p| Some(ListEntry::file(p)))
        .collect();
        let stats = tree_stats(&build_tree(&listing));

        assert_eq!(stats.total_files, 5);
        assert_eq!(stats.total_folders, 2);
        assert_eq!(stats.file_types[0].extension, "rs");
        assert_eq!(stats.file_types[0].count, 3);
        assert!((stats.file_types[0].percentage - 60.0).abs() < 1e-9);
        let rest: Vec<&str> = stats.file_types[1..].iter().map(|s| s.extension.as_str()).collect();
        assert_eq!(rest, vec!["md", NO_EXTENSION]);
    }

    #[test]
    fn test_empty_tree() {
        let stats = tree_stats(&FileNode::root());
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_folders, 0);
        assert!(stats.file_types.is_empty());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a.tar.gz"), "gz");
        assert_eq!(file_extension(".gitignore"), "gitignore");
        assert_eq!(file_extension("Makefile"), "");
        assert_eq!(file_extension("dot."), "");
    }
}
