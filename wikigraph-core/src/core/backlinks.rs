//! Reverse link index: which notes point at a given note, and where.

use crate::core::note::NoteCollection;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Default number of words kept on each side of a link in a snippet.
pub const DEFAULT_CONTEXT_WORDS: usize = 10;

const ELLIPSIS: &str = "...";

/// One inbound reference to a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlink {
    pub source_id: String,
    pub source_title: String,
    /// Words around the link, for display only.
    pub context: String,
}

/// Maps a note's current title to the notes that link to it.
///
/// The index is rebuilt wholesale from a [`NoteCollection`]; it is never
/// patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct BacklinkIndex {
    entries: HashMap<String, Vec<Backlink>>,
    context_words: usize,
}

impl BacklinkIndex {
    pub fn new(context_words: usize) -> Self {
        Self {
            entries: HashMap::new(),
            context_words,
        }
    }

    /// Replaces the whole index with one built from `notes`.
    ///
    /// Each source note contributes at most one backlink per target note,
    /// taken from the first occurrence of a link that resolves to it.
    pub fn rebuild(&mut self, notes: &NoteCollection) {
        let mut entries: HashMap<String, Vec<Backlink>> = HashMap::new();

        for source in notes {
            let body = source.body();
            let mut seen_targets = HashSet::new();
            for occurrence in source.link_occurrences() {
                let Some(target) = notes.resolve(&occurrence.target) else {
                    continue;
                };
                if target.id == source.id || !seen_targets.insert(target.id.clone()) {
                    continue;
                }
                entries
                    .entry(title_key(&target.title))
                    .or_default()
                    .push(Backlink {
                        source_id: source.id.clone(),
                        source_title: source.title.clone(),
                        context: context_snippet(
                            body,
                            occurrence.span.clone(),
                            self.context_words,
                        ),
                    });
            }
        }

        log::debug!(
            "backlink index rebuilt: {} notes, {} linked titles",
            notes.len(),
            entries.len()
        );
        self.entries = entries;
    }

    /// Backlinks for the note titled `title`, in source-collection order.
    ///
    /// Unknown titles yield an empty slice.
    pub fn backlinks_for(&self, title: &str) -> &[Backlink] {
        self.entries
            .get(&title_key(title))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn backlink_count(&self, title: &str) -> usize {
        self.backlinks_for(title).len()
    }

    /// Number of distinct titles with at least one backlink.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lower-cased titles present in the index, sorted.
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        titles.sort_unstable();
        titles
    }
}

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Builds a snippet of up to `words` words either side of `span` in `text`.
///
/// Whitespace collapses to single spaces. An ellipsis marks each side that
/// was cut short.
pub fn context_snippet(text: &str, span: std::ops::Range<usize>, words: usize) -> String {
    let before: Vec<&str> = text[..span.start].split_whitespace().collect();
    let after: Vec<&str> = text[span.end..].split_whitespace().collect();
    let marker = text[span].split_whitespace().collect::<Vec<_>>().join(" ");

    let kept_before = &before[before.len().saturating_sub(words)..];
    let kept_after = &after[..after.len().min(words)];

    let mut parts: Vec<&str> = Vec::with_capacity(kept_before.len() + kept_after.len() + 3);
    if kept_before.len() < before.len() {
        parts.push(ELLIPSIS);
    }
    parts.extend_from_slice(kept_before);
    parts.push(&marker);
    parts.extend_from_slice(kept_after);
    if kept_after.len() < after.len() {
        parts.push(ELLIPSIS);
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::note::Note;

    fn corpus(notes: &[(&str, &str)]) -> NoteCollection {
        notes
            .iter()
            .map(|(id, content)| Note::from_parts(*id, *content, None, None, None))
            .collect()
    }

    #[test]
    fn test_backlinks_keyed_by_target_title() {
        let notes = corpus(&[
            ("a", "# Alpha\nsee [[Beta]]"),
            ("b", "# Beta\nnothing here"),
            ("c", "# Gamma\nalso [[id:b]] twice [[Beta]]"),
        ]);
        let mut index = BacklinkIndex::new(DEFAULT_CONTEXT_WORDS);
        index.rebuild(&notes);

        let links = index.backlinks_for("Beta");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].source_id, "a");
        assert_eq!(links[0].source_title, "Alpha");
        assert_eq!(links[1].source_id, "c");
        assert_eq!(index.backlink_count("beta"), 2);
    }

    #[test]
    fn test_unknown_title_is_empty() {
        let index = BacklinkIndex::new(DEFAULT_CONTEXT_WORDS);
        assert!(index.backlinks_for("Nobody").is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_note_is_never_its_own_backlink() {
        let notes = corpus(&[("a", "# Alpha\n[[Alpha]] [[id:a]]")]);
        let mut index = BacklinkIndex::new(DEFAULT_CONTEXT_WORDS);
        index.rebuild(&notes);
        assert!(index.backlinks_for("Alpha").is_empty());
    }

    #[test]
    fn test_rebuild_replaces_previous_entries() {
        let mut index = BacklinkIndex::new(DEFAULT_CONTEXT_WORDS);
        index.rebuild(&corpus(&[("a", "[[id:b]]"), ("b", "# Beta")]));
        assert_eq!(index.backlink_count("Beta"), 1);

        index.rebuild(&corpus(&[("a", "no links"), ("b", "# Beta")]));
        assert_eq!(index.backlink_count("Beta"), 0);
        assert!(index.titles().is_empty());
    }

    #[test]
    fn test_id_backlink_follows_rename() {
        let mut index = BacklinkIndex::new(DEFAULT_CONTEXT_WORDS);
        index.rebuild(&corpus(&[("a", "[[id:b]]"), ("b", "# Renamed")]));
        assert_eq!(index.backlink_count("Renamed"), 1);
        assert_eq!(index.titles(), vec!["renamed"]);
    }

    #[test]
    fn test_context_snippet_truncates_with_ellipsis() {
        let text = "one two three four [[Link]] five six seven eight";
        let start = text.find("[[").unwrap();
        let end = text.find("]]").unwrap() + 2;
        assert_eq!(
            context_snippet(text, start..end, 2),
            "... three four [[Link]] five six ..."
        );
        assert_eq!(context_snippet(text, start..end, 10), text);
    }

    #[test]
    fn test_context_snippet_collapses_newlines() {
        let text = "line one\n\n[[Link]]\nline two";
        let start = text.find("[[").unwrap();
        assert_eq!(
            context_snippet(text, start..start + 8, 5),
            "line one [[Link]] line two"
        );
    }
}
