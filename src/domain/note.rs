//! Note record as held by the client, plus the draft type used for writes.

use crate::domain::{CategoryId, NoteId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A note synchronized from the backend.
///
/// Notes are only ever constructed from confirmed server responses (or by
/// tests through [`Note::builder`]), so the fields are read-only.
///
/// # Invariants
/// - `category_id` is always a real category, never [`CategoryId::All`]
/// - `updated_at` is always set; the store fills in "now" when the server
///   omits it
///
/// # Examples
///
/// ```
/// use notekeeper::domain::{CategoryId, Note, NoteId};
///
/// let note = Note::builder(NoteId::new(1), "Groceries")
///     .description("milk, eggs")
///     .category_id(CategoryId::Id(2))
///     .build();
/// assert_eq!(note.title(), "Groceries");
/// assert_eq!(note.category_id(), CategoryId::Id(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    id: NoteId,
    title: String,
    description: String,
    category_id: CategoryId,
    #[serde(rename = "category", skip_serializing_if = "Option::is_none")]
    category_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a builder for a note with the given id and title.
    pub fn builder(id: NoteId, title: impl Into<String>) -> NoteBuilder {
        NoteBuilder::new(id, title)
    }

    /// Returns the note's identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's description (possibly empty).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the category the note is assigned to.
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the category display name embedded by the backend, if any.
    pub fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    /// Returns the note's tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns when the note was created, if the backend reported it.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns when the note was last modified.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a draft pre-filled with this note's editable fields.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category_id: Some(self.category_id),
            tags: self.tags.clone(),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id)
    }
}

/// Builder for constructing a Note with optional fields.
pub struct NoteBuilder {
    id: NoteId,
    title: String,
    description: String,
    category_id: CategoryId,
    category_name: Option<String>,
    tags: Vec<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl NoteBuilder {
    fn new(id: NoteId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category_id: CategoryId::FALLBACK,
            category_name: None,
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category. The `All` sentinel is replaced by the fallback.
    pub fn category_id(mut self, category_id: CategoryId) -> Self {
        self.category_id = category_id.or_fallback(CategoryId::FALLBACK);
        self
    }

    pub fn category_name(mut self, name: Option<String>) -> Self {
        self.category_name = name;
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the note. A missing `updated_at` defaults to now.
    pub fn build(self) -> Note {
        Note {
            id: self.id,
            title: self.title,
            description: self.description,
            category_id: self.category_id,
            category_name: self.category_name,
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

/// User-supplied note fields for create and full-replace requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    /// Target category. `None` and `Some(CategoryId::All)` both mean
    /// "use the fallback category".
    pub category_id: Option<CategoryId>,
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category_id: None,
            tags: Vec::new(),
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Server id of the category to send; a missing or `All` value becomes
    /// `fallback`.
    pub fn category_or(&self, fallback: u64) -> u64 {
        self.category_id
            .and_then(CategoryId::real)
            .unwrap_or(fallback)
    }
}
