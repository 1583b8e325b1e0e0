//! Wikilink extraction.
//!
//! A wikilink is a `[[...]]` marker inside a note body. Its target is either a
//! stable note identifier (`[[id:IDENT]]`) or a literal title (`[[Title]]`);
//! both forms accept a display alias after a pipe (`[[Title|shown text]]`).
//!
//! Extraction never resolves anything. Whether a target exists is decided by
//! [`NoteCollection::resolve`](super::note::NoteCollection::resolve).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;
use std::sync::OnceLock;

/// Prefix marking an identifier-based link target.
pub const ID_PREFIX: &str = "id:";

/// The target of a wikilink, exactly as written in the note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum LinkTarget {
    /// Resolves by stable note identifier; survives renames.
    ById(String),
    /// Legacy form; resolves by case-insensitive title match.
    ByTitle(String),
}

impl LinkTarget {
    /// Parses the inside of a `[[...]]` marker, dropping any alias.
    ///
    /// Returns `None` when the target is empty after trimming.
    #[must_use]
    pub fn parse(inner: &str) -> Option<Self> {
        let target = inner.split('|').next().unwrap_or("").trim();
        if let Some(id) = target.strip_prefix(ID_PREFIX) {
            let id = id.trim();
            return (!id.is_empty()).then(|| Self::ById(id.to_string()));
        }
        (!target.is_empty()).then(|| Self::ByTitle(target.to_string()))
    }

    /// The raw identifier or title text.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::ById(v) | Self::ByTitle(v) => v,
        }
    }
}

/// One `[[...]]` marker found in a note body.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOccurrence {
    pub target: LinkTarget,
    /// Byte range of the whole marker, brackets included.
    pub span: Range<usize>,
}

fn wikilink_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Markers close on the same line and may not nest.
    RE.get_or_init(|| Regex::new(r"\[\[([^\[\]\r\n]+)\]\]").expect("wikilink pattern is valid"))
}

/// Returns every wikilink marker in `text`, in order of appearance.
///
/// Repeated markers are all returned; unterminated or empty markers are not.
pub fn find_occurrences(text: &str) -> Vec<LinkOccurrence> {
    wikilink_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let target = LinkTarget::parse(caps.get(1)?.as_str())?;
            Some(LinkOccurrence {
                target,
                span: whole.range(),
            })
        })
        .collect()
}

/// Returns the distinct link targets in `text`, in first-occurrence order.
///
/// Targets are compared verbatim; `[[Foo]]` and `[[foo]]` are kept apart
/// here and only merge once resolved to the same note.
pub fn extract_links(text: &str) -> Vec<LinkTarget> {
    let mut seen = HashSet::new();
    find_occurrences(text)
        .into_iter()
        .filter_map(|occ| seen.insert(occ.target.clone()).then_some(occ.target))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_target() {
        assert_eq!(
            LinkTarget::parse("Project Plan"),
            Some(LinkTarget::ByTitle("Project Plan".to_string()))
        );
    }

    #[test]
    fn test_parse_id_target_with_alias() {
        assert_eq!(
            LinkTarget::parse("id:1234-abcd|the plan"),
            Some(LinkTarget::ById("1234-abcd".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_targets() {
        assert_eq!(LinkTarget::parse("   "), None);
        assert_eq!(LinkTarget::parse("id:"), None);
        assert_eq!(LinkTarget::parse("|alias only"), None);
    }

    #[test]
    fn test_repeated_links_are_deduplicated() {
        let links = extract_links("See [[B]] and again [[B]], then [[C]] and [[B|bee]].");
        assert_eq!(
            links,
            vec![
                LinkTarget::ByTitle("B".to_string()),
                LinkTarget::ByTitle("C".to_string()),
            ]
        );
    }

    #[test]
    fn test_occurrences_keep_repeats_and_spans() {
        let text = "[[A]] x [[A]]";
        let occ = find_occurrences(text);
        assert_eq!(occ.len(), 2);
        assert_eq!(&text[occ[0].span.clone()], "[[A]]");
        assert_eq!(occ[1].span.start, 8);
    }

    #[test]
    fn test_unterminated_marker_yields_nothing() {
        assert!(extract_links("broken [[Dangling and more text").is_empty());
        assert!(extract_links("split [[across\nlines]]").is_empty());
        assert!(extract_links("empty [[]] marker").is_empty());
    }

    #[test]
    fn test_mixed_id_and_title_links() {
        let links = extract_links("[[id:n1]] [[Title One]] [[id:n1|alias]]");
        assert_eq!(
            links,
            vec![
                LinkTarget::ById("n1".to_string()),
                LinkTarget::ByTitle("Title One".to_string()),
            ]
        );
    }

    #[test]
    fn test_link_target_serializes_tagged() {
        let json = serde_json::to_string(&LinkTarget::ById("x".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"byId","value":"x"}"#);
    }
}
