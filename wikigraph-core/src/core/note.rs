//! Notes, their metadata block, and the note collection snapshot.

use crate::core::link::{self, LinkOccurrence, LinkTarget};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Title used when a note declares none.
pub const UNTITLED: &str = "Untitled";

const METADATA_FENCE: &str = "---";

/// A note as supplied by the host application.
///
/// Notes are owned externally; the engine only reads them. The title is
/// derived from the metadata block when the note is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub folder: Option<String>,
    pub created_at: Option<i64>,
    pub modified_at: Option<i64>,
}

impl Note {
    /// Creates a brand-new note with a fresh UUID and the current time.
    pub fn new(content: impl Into<String>, folder: Option<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self::from_parts(Uuid::new_v4().to_string(), content, folder, Some(now), Some(now))
    }

    /// Wraps an externally owned note record.
    pub fn from_parts(
        id: impl Into<String>,
        content: impl Into<String>,
        folder: Option<String>,
        created_at: Option<i64>,
        modified_at: Option<i64>,
    ) -> Self {
        let content = content.into();
        let title = derive_title(&content);
        Self {
            id: id.into(),
            title,
            content,
            folder,
            created_at,
            modified_at,
        }
    }

    /// The content with the leading metadata block removed.
    #[must_use]
    pub fn body(&self) -> &str {
        split_metadata(&self.content).1
    }

    /// All `key: value` pairs from the metadata block, in order.
    #[must_use]
    pub fn metadata(&self) -> Vec<(String, String)> {
        split_metadata(&self.content)
            .0
            .map(parse_metadata)
            .unwrap_or_default()
    }

    /// Every wikilink marker in the body, repeats included.
    #[must_use]
    pub fn link_occurrences(&self) -> Vec<LinkOccurrence> {
        link::find_occurrences(self.body())
    }

    /// The distinct link targets this note declares, unresolved.
    #[must_use]
    pub fn outgoing_links(&self) -> Vec<LinkTarget> {
        link::extract_links(self.body())
    }
}

/// Splits `content` into its metadata block (without fences) and the body.
///
/// The block must start on the first line with `---` and end with a line
/// that is exactly `---`. Without a closing fence the whole content is body.
fn split_metadata(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix(METADATA_FENCE)
        .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == METADATA_FENCE {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(block), body);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parses `key: value` lines. Lines without a colon are skipped.
fn parse_metadata(block: &str) -> Vec<(String, String)> {
    block
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            Some((key.to_lowercase(), value.to_string()))
        })
        .collect()
}

/// Title from the metadata block, else the first `# ` heading, else [`UNTITLED`].
fn derive_title(content: &str) -> String {
    let (block, body) = split_metadata(content);
    if let Some(title) = block
        .map(parse_metadata)
        .unwrap_or_default()
        .into_iter()
        .find_map(|(k, v)| (k == "title" && !v.is_empty()).then_some(v))
    {
        return title;
    }
    body.lines()
        .map(str::trim)
        .find_map(|l| l.strip_prefix("# "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| UNTITLED.to_string(), str::to_string)
}

/// An ordered snapshot of the host's notes.
///
/// Insertion order is the collection's iteration order and is what every
/// "first N" rule in the engine refers to.
#[derive(Debug, Clone, Default)]
pub struct NoteCollection {
    notes: Vec<Note>,
    by_id: HashMap<String, usize>,
    by_title: HashMap<String, usize>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a note. A note with an existing ID replaces the old one in place.
    pub fn insert(&mut self, note: Note) {
        if let Some(&idx) = self.by_id.get(&note.id) {
            self.notes[idx] = note;
            self.reindex_titles();
        } else {
            let idx = self.notes.len();
            self.by_id.insert(note.id.clone(), idx);
            self.by_title
                .entry(note.title.to_lowercase())
                .or_insert(idx);
            self.notes.push(note);
        }
    }

    fn reindex_titles(&mut self) {
        self.by_title.clear();
        for (idx, note) in self.notes.iter().enumerate() {
            self.by_title.entry(note.title.to_lowercase()).or_insert(idx);
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.by_id.get(id).map(|&idx| &self.notes[idx])
    }

    /// Case-insensitive title lookup; the first note in order wins on ties.
    pub fn find_by_title(&self, title: &str) -> Option<&Note> {
        self.by_title
            .get(&title.trim().to_lowercase())
            .map(|&idx| &self.notes[idx])
    }

    /// Resolves a link target to the note it refers to, if any.
    pub fn resolve(&self, target: &LinkTarget) -> Option<&Note> {
        match target {
            LinkTarget::ById(id) => self.get(id),
            LinkTarget::ByTitle(title) => self.find_by_title(title),
        }
    }

    /// Distinct IDs of the notes `note` links to, in declaration order.
    ///
    /// Unresolvable targets and links back to `note` itself are dropped.
    pub fn resolved_links(&self, note: &Note) -> Vec<String> {
        let mut seen = HashSet::new();
        note.outgoing_links()
            .iter()
            .filter_map(|target| {
                let resolved = self.resolve(target);
                if resolved.is_none() {
                    log::trace!("unresolved link {:?} in note {}", target, note.id);
                }
                resolved
            })
            .filter(|target| target.id != note.id)
            .filter_map(|target| seen.insert(target.id.clone()).then(|| target.id.clone()))
            .collect()
    }
}

impl FromIterator<Note> for NoteCollection {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        let mut collection = Self::new();
        for note in iter {
            collection.insert(note);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
