use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Fallback path for entries that carry neither a path nor a name.
pub const UNNAMED_ENTRY: &str = "unnamed";

/// One record of the backend's flat content listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListEntry {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(rename = "commitMessage", default)]
    pub commit_message: Option<String>,
    #[serde(rename = "pusherName", default)]
    pub pusher_name: Option<String>,
    #[serde(rename = "pushedAt", default)]
    pub pushed_at: Option<String>,
}

impl ListEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            entry_type: Some("file".to_string()),
            ..Default::default()
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            entry_type: Some("dir".to_string()),
            ..Default::default()
        }
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type.as_deref() == Some("dir")
    }

    /// First non-empty of `path`, `name`, then the literal `"unnamed"`.
    pub fn effective_path(&self) -> &str {
        self.path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or(UNNAMED_ENTRY)
    }
}

/// Decodes a raw listing element by element. Elements that are not a
/// well-formed entry become `None` instead of failing the whole listing.
pub fn decode_listing(values: Vec<Value>) -> Vec<Option<ListEntry>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            if value.is_null() {
                return None;
            }
            match serde_json::from_value::<ListEntry>(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping malformed listing entry {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_listing_skips_malformed_elements() {
        let entries = decode_listing(vec![
            json!({"path": "ok.txt", "type": "file"}),
            json!({"path": 7, "type": "file"}),
            json!("just a string"),
            Value::Null,
            json!({"name": "docs", "type": "dir"}),
        ]);

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0], Some(ListEntry::file("ok.txt")));
        assert!(entries[1].is_none());
        assert!(entries[2].is_none());
        assert!(entries[3].is_none());
        assert!(entries[4].as_ref().unwrap().is_dir());
    }

    #[test]
    fn test_effective_path_fallbacks() {
        let entry = ListEntry {
            name: Some("README.md".into()),
            ..Default::default()
        };
        assert_eq!(entry.effective_path(), "README.md");

        let entry = ListEntry {
            path: Some(String::new()),
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(entry.effective_path(), UNNAMED_ENTRY);

        assert_eq!(ListEntry::file("a/b.txt").effective_path(), "a/b.txt");
    }

    #[test]
    fn test_deserialize_backend_listing_with_nulls() {
        let raw = r#"[
            {"path": "src", "type": "dir"},
            null,
            {"path": "src/lib.rs", "type": "file", "html_url": "https://github.com/o/r/blob/main/src/lib.rs",
             "download_url": "https://raw/o/r/main/src/lib.rs", "commitMessage": "init", "pusherName": "bob"}
        ]"#;
        let entries: Vec<Option<ListEntry>> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].as_ref().unwrap().is_dir());
        assert!(entries[1].is_none());
        let file = entries[2].as_ref().unwrap();
        assert!(!file.is_dir());
        assert_eq!(file.commit_message.as_deref(), Some("init"));
        assert_eq!(file.pushed_at, None);
    }
}
