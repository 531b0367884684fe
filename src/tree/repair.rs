//! Repair of duplicated names coming from the backend.
//!
//! The content listing sometimes returns segments and commit fields with
//! their text repeated (`foo.txt.txt`, `testtest`, `fixfix`). These functions
//! undo that. They are heuristics: a file genuinely named `abab` is also
//! collapsed to `ab`.

use tracing::debug;

/// Names seen doubled often enough to be collapsed explicitly.
pub const KNOWN_DOUBLED_NAMES: &[&str] = &[".gitattributes", ".gitignore", "2.jpg"];

/// `base.ext.ext` → `base.ext`, where `base` is the text before the first
/// dot and `ext` the text after the last one.
pub fn repair_doubled_extension(part: &str) -> Option<String> {
    let (base, _) = part.split_once('.')?;
    let (_, ext) = part.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }

    if part.len() == base.len() + 2 * (ext.len() + 1)
        && part == format!("{}.{}.{}", base, ext, ext)
    {
        Some(format!("{}.{}", base, ext))
    } else {
        None
    }
}

/// `t + t` → `t`. Empty strings and odd lengths are returned unchanged.
pub fn repair_doubled(value: &str) -> &str {
    let len = value.len();
    if len == 0 || len % 2 != 0 {
        return value;
    }

    let mid = len / 2;
    if value.is_char_boundary(mid) && value[..mid] == value[mid..] {
        &value[..mid]
    } else {
        value
    }
}

/// Applies every segment repair in turn.
pub fn repair_segment(part: &str) -> String {
    if let Some(fixed) = repair_doubled_extension(part) {
        debug!("Correcting duplicated extension: {} -> {}", part, fixed);
        return fixed;
    }

    let halved = repair_doubled(part);
    if halved.len() != part.len() {
        debug!("Correcting duplicated name: {} -> {}", part, halved);
        return halved.to_string();
    }

    for known in KNOWN_DOUBLED_NAMES {
        if part.len() == known.len() * 2 && part.starts_with(known) && part.ends_with(known) {
            debug!("Correcting known duplicated name: {} -> {}", part, known);
            return known.to_string();
        }
    }

    part.to_string()
}

/// Half-string repair for commit messages and pusher names.
pub fn repair_field(field: &str, value: &str) -> String {
    let fixed = repair_doubled(value);
    if fixed.len() != value.len() {
        debug!("Correcting duplicated {}: \"{}\" -> \"{}\"", field, value, fixed);
    }
    fixed.to_string()
}

#[cfg(test)]
#[path = "repair_tests.rs"]
mod tests;
