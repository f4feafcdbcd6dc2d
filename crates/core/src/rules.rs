//! Label-anchored text rules used by the field extractor.
//!
//! Each rule is a small pure function over `&str`, so the extractor reads as a
//! sequence of "locate label, slice, clean" steps and any rule can be tuned on
//! its own when the forum markup changes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marks the start of the statistics block inside the first cell.
pub const TOPICS_LABEL: &str = "Themen:";

/// Precedes the title of the most recent thread in the first cell.
pub const LAST_POST_LABEL: &str = "Letzter Beitrag:";

/// Separates a thread title from its author.
pub const AUTHOR_MARKER: &str = "von ";

// " - in Lohnsteuer..." glued onto a title names the forum it was posted in.
static FORUM_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\s+-\s+in\s+\p{Lu}.*$").expect("valid forum suffix pattern"));

/// Collapses every whitespace run (including `&nbsp;`) to one ASCII space and trims.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
///
/// ASCII lowercasing keeps byte lengths intact, so the offset is valid for
/// slicing `haystack` even when it contains umlauts.
pub fn find_label(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

/// Cuts `text` right before `label` when the label occurs after the first byte.
pub fn truncate_before_label<'a>(text: &'a str, label: &str) -> &'a str {
    match find_label(text, label) {
        Some(pos) if pos > 0 => &text[..pos],
        _ => text,
    }
}

/// Everything following the first occurrence of `label`, or `None` if absent.
pub fn text_after_label<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    find_label(text, label).map(|pos| &text[pos + label.len()..])
}

/// Removes a trailing " - in <Forum>..." suffix from a thread title.
pub fn strip_forum_suffix(title: &str) -> &str {
    match FORUM_SUFFIX.find(title) {
        Some(m) => &title[..m.start()],
        None => title,
    }
}

/// Parses a counter cell such as "1.234"; anything unparseable counts as zero.
pub fn parse_count(text: &str) -> u64 {
    text.trim().replace('.', "").parse().unwrap_or(0)
}

/// Text up to the first space.
pub fn first_token(text: &str) -> &str {
    text.split(' ').next().unwrap_or_default()
}
