//! Filter Engine: derives the visible notes from the full collection and the
//! current selection.

use serde::{Deserialize, Serialize};

use crate::domain::{Category, CategoryId, Note};

/// Ephemeral filter state owned by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Free-text query; trimmed and lowercased before matching.
    pub query: String,
    /// Category to show, or `All`.
    pub category: CategoryId,
}

impl Selection {
    pub fn new(query: impl Into<String>, category: CategoryId) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// The query as it is matched: trimmed and lowercased.
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }
}

/// Returns the notes matching `selection`, in input order.
///
/// A note passes when its category equals the selected one (any category
/// passes for `All`) and, for a non-empty query, the query is a substring of
/// its title, description, category name or one of its tags. Matching is
/// case-insensitive containment with no tokenization or ranking.
///
/// Category names come from `categories`, falling back to the name the
/// backend embedded in the note.
///
/// # Examples
///
/// ```
/// use notekeeper::domain::{CategoryId, Note, NoteId};
/// use notekeeper::filter::{Selection, filter_notes};
///
/// let notes = vec![
///     Note::builder(NoteId::new(1), "Groceries").description("milk, eggs").build(),
///     Note::builder(NoteId::new(2), "Report").description("Q3 numbers").build(),
/// ];
/// let visible = filter_notes(&notes, &[], &Selection::new("MILK", CategoryId::All));
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].title(), "Groceries");
/// ```
pub fn filter_notes<'a>(
    notes: &'a [Note],
    categories: &[Category],
    selection: &Selection,
) -> Vec<&'a Note> {
    matching_indices(notes, categories, selection)
        .into_iter()
        .map(|i| &notes[i])
        .collect()
}

fn matching_indices(
    notes: &[Note],
    categories: &[Category],
    selection: &Selection,
) -> Vec<usize> {
    let query = selection.normalized_query();
    notes
        .iter()
        .enumerate()
        .filter(|(_, note)| in_category(note, selection.category))
        .filter(|(_, note)| query.is_empty() || matches_query(note, categories, &query))
        .map(|(i, _)| i)
        .collect()
}

fn in_category(note: &Note, category: CategoryId) -> bool {
    category.is_all() || note.category_id() == category
}

/// `query` must already be trimmed and lowercased.
fn matches_query(note: &Note, categories: &[Category], query: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(query);

    let category_name = categories
        .iter()
        .find(|c| c.id() == note.category_id())
        .map(Category::name)
        .or_else(|| note.category_name());

    contains(note.title())
        || contains(note.description())
        || category_name.is_some_and(|name| contains(name))
        || note.tags().iter().any(|tag| contains(tag))
}

/// Memoizes [`filter_notes`] on the inputs' revisions and the selection.
///
/// Stores expose a revision counter bumped on every change; as long as both
/// revisions and the selection are unchanged the previous result is reused.
#[derive(Debug, Default)]
pub struct FilterCache {
    key: Option<(u64, u64, Selection)>,
    indices: Vec<usize>,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the visible notes, recomputing only when an input changed.
    pub fn visible<'a>(
        &mut self,
        notes: &'a [Note],
        notes_revision: u64,
        categories: &[Category],
        categories_revision: u64,
        selection: &Selection,
    ) -> Vec<&'a Note> {
        if !self.is_fresh(notes_revision, categories_revision, selection) {
            self.indices = matching_indices(notes, categories, selection);
            self.key = Some((notes_revision, categories_revision, selection.clone()));
        }
        self.indices.iter().filter_map(|&i| notes.get(i)).collect()
    }

    /// Returns true if a cached result exists for these inputs.
    pub fn is_fresh(
        &self,
        notes_revision: u64,
        categories_revision: u64,
        selection: &Selection,
    ) -> bool {
        matches!(
            &self.key,
            Some((n, c, s)) if *n == notes_revision && *c == categories_revision && s == selection
        )
    }

    /// Drops the cached result.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.indices.clear();
    }
}
