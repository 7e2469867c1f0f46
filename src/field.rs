//! Field-name parsing.
//!
//! `user[address][city]` and `user.address.city` both parse to
//! `["user", "address", "city"]`. A name holding the `[]` collection marker
//! is kept whole as a single literal segment.

use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\[\]]").unwrap());

/// Marker for "every element of this collection".
pub const COLLECTION_MARKER: &str = "[]";

/// Parse a field name into its path segments. Never returns an empty vector.
pub fn parse_field(name: &str) -> Vec<String> {
    if name.contains(COLLECTION_MARKER) {
        return vec![name.to_string()];
    }

    let mut dotted = name.to_string();
    if dotted.contains('[') {
        dotted = BRACKETS.replace_all(&dotted, ".").into_owned();
        dotted = dotted.replace("..", ".");
        dotted = dotted.trim_matches('.').to_string();
    }

    if dotted.contains('.') {
        dotted.split('.').map(String::from).collect()
    } else {
        vec![dotted]
    }
}

/// For a literal `[]` segment, the path each collection element is asked for.
///
/// `items[].name` and `items[][name]` yield `["name"]`; `items[]` yields `None`.
pub fn element_path(segment: &str) -> Option<Vec<String>> {
    let at = segment.rfind(COLLECTION_MARKER)?;
    let tail = segment[at + COLLECTION_MARKER.len()..].trim_start_matches('.');
    if tail.is_empty() {
        return None;
    }

    let path = parse_field(tail);
    if path.iter().all(|s| s.is_empty()) {
        None
    } else {
        Some(path)
    }
}
