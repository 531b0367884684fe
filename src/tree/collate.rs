//! Locale-style name ordering for tree siblings.
//!
//! Names compare in three levels, like a root-locale collator:
//!
//! 1. base characters: punctuation, then other symbols, then digits, then
//!    letters (case and accents folded away)
//! 2. accents: unaccented before accented
//! 3. case: lowercase before uppercase
//!
//! Remaining ties fall back to code point order so the result is total.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// ASCII punctuation in root collation order.
const PUNCTUATION_ORDER: &str = " _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

#[derive(Debug, PartialEq, Eq)]
struct CollationKey {
    primary: Vec<(Class, u32)>,
    accents: Vec<u32>,
    uppercase: Vec<bool>,
}

fn primary_weight(c: char) -> (Class, u32) {
    if let Some(position) = PUNCTUATION_ORDER.find(c) {
        return (Class::Punctuation, position as u32);
    }
    if c.is_alphabetic() {
        let folded = c.to_lowercase().next().unwrap_or(c);
        return (Class::Letter, folded as u32);
    }
    if let Some(digit) = c.to_digit(10) {
        return (Class::Digit, digit);
    }
    if c.is_numeric() {
        return (Class::Digit, c as u32);
    }
    (Class::Symbol, c as u32)
}

fn collation_key(name: &str) -> CollationKey {
    let mut key = CollationKey {
        primary: Vec::with_capacity(name.len()),
        accents: Vec::with_capacity(name.len()),
        uppercase: Vec::with_capacity(name.len()),
    };

    for c in name.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = key.accents.last_mut() {
                *last = last.saturating_add(c as u32);
            }
            continue;
        }
        key.primary.push(primary_weight(c));
        key.accents.push(0);
        key.uppercase.push(c.is_uppercase());
    }
    key
}

/// Sibling order used by the tree builder.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let (ka, kb) = (collation_key(a), collation_key(b));
    ka.primary
        .cmp(&kb.primary)
        .then_with(|| ka.accents.cmp(&kb.accents))
        .then_with(|| ka.uppercase.cmp(&kb.uppercase))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        names.sort_by(|a, b| locale_cmp(a, b));
        names
    }

    #[test]
    fn test_case_folds_then_lowercase_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("README.md", "readme.md"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_punctuation_before_digits_before_letters() {
        assert_eq!(
            sorted(&["fig.txt", "404.html", "_config.yml", "Gemfile"]),
            vec!["_config.yml", "404.html", "fig.txt", "Gemfile"]
        );
        assert_eq!(locale_cmp("-x", "_x"), Ordering::Greater);
        assert_eq!(locale_cmp(".github", "_posts"), Ordering::Greater);
    }

    #[test]
    fn test_accents_fold_into_base_letter() {
        assert_eq!(
            sorted(&["fig.txt", "éclair.txt", "eclair.md", "zeta"]),
            vec!["eclair.md", "éclair.txt", "fig.txt", "zeta"]
        );
        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
        assert_eq!(locale_cmp("é", "f"), Ordering::Less);
    }

    #[test]
    fn test_precomposed_and_decomposed_are_tied_then_ordered() {
        let precomposed = "\u{e9}";
        let decomposed = "e\u{301}";
        assert_eq!(collation_key(precomposed), collation_key(decomposed));
        assert_ne!(locale_cmp(precomposed, decomposed), Ordering::Equal);
    }
}
