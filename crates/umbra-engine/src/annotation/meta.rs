//! Note-tag extraction: `<key:value>` or bare `<key>` inside free text.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<key>` or `<key:value>`. Neither part may contain `<` or `>`, so an
/// unclosed tag never swallows the next one.
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([^<>:]+)(?::([^<>]*))?>").unwrap());

/// Find the value of the last `<key:value>` tag with the given key.
///
/// A bare `<key>` tag yields `Some("")`. Keys are matched exactly
/// (case-sensitive), the value is trimmed.
pub fn tag_value<'a>(note: &'a str, key: &str) -> Option<&'a str> {
    RE_TAG
        .captures_iter(note)
        .filter(|caps| caps[1].trim() == key)
        .last()
        .map(|caps| caps.get(2).map_or("", |value| value.as_str().trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_tag_in_free_text() {
        let note = "A sleepy cat.\n<shadow:circle|0:10>\nLikes fish.";
        assert_eq!(tag_value(note, "shadow"), Some("circle|0:10"));
    }

    #[test]
    fn keys_are_exact() {
        let note = "<shadowAlt:none><shadow:real>";
        assert_eq!(tag_value(note, "shadow"), Some("real"));
        assert_eq!(tag_value(note, "shadowAlt"), Some("none"));
        assert_eq!(tag_value(note, "Shadow"), None);
    }

    #[test]
    fn last_tag_wins() {
        assert_eq!(tag_value("<shadow:real><shadow:circle>", "shadow"), Some("circle"));
    }

    #[test]
    fn bare_tag_has_empty_value() {
        assert_eq!(tag_value("<shadow>", "shadow"), Some(""));
    }

    #[test]
    fn padding_around_key_and_value_is_ignored() {
        assert_eq!(tag_value("< shadow : circle|10:0 >", "shadow"), Some("circle|10:0"));
    }

    #[test]
    fn unclosed_tags_are_skipped() {
        assert_eq!(tag_value("<shadow:real <shadow:none>", "shadow"), Some("none"));
        assert_eq!(tag_value("<shadow:real", "shadow"), None);
    }
}
