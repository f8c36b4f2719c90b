//! Note Store: the client's copy of the notes collection.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{StoreError, StoreResult};
use crate::backend::{NewNote, NoteRecord, NoteReplace, NotesBackend};
use crate::domain::{CategoryId, Note, NoteDraft, NoteId};

/// Holds the notes collection and keeps it in step with the backend.
///
/// The collection only changes after the backend confirms a request. A
/// failed call records its message in [`NoteStore::error`] and returns the
/// error, leaving the collection as it was (except for [`NoteStore::fetch_all`],
/// which empties it).
pub struct NoteStore {
    backend: Arc<dyn NotesBackend>,
    fallback_id: u64,
    notes: Vec<Note>,
    last_error: Option<String>,
    revision: u64,
}

impl NoteStore {
    /// Creates an empty store. `fallback_category` is used for notes that
    /// arrive or are submitted without a real category.
    pub fn new(backend: Arc<dyn NotesBackend>, fallback_category: CategoryId) -> Self {
        Self {
            backend,
            fallback_id: fallback_category.real().unwrap_or(CategoryId::FALLBACK_ID),
            notes: Vec::new(),
            last_error: None,
            revision: 0,
        }
    }

    /// Replaces the collection with the backend's notes.
    pub async fn fetch_all(&mut self) -> StoreResult<&[Note]> {
        match self.backend.list_notes().await {
            Ok(records) => {
                let now = Utc::now();
                let fallback = self.fallback_category();
                self.notes = records
                    .into_iter()
                    .map(|r| normalize_note(r, fallback, now))
                    .collect();
                self.succeed();
                debug!(count = self.notes.len(), "fetched notes");
                Ok(&self.notes)
            }
            Err(err) => {
                self.notes.clear();
                self.revision += 1;
                Err(self.fail(err.into(), "fetch notes"))
            }
        }
    }

    /// Creates a note and appends the server's copy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] without contacting the backend if the
    /// title or description is empty.
    pub async fn add(&mut self, draft: NoteDraft) -> StoreResult<Note> {
        let title = draft.title.trim();
        let description = draft.description.trim();
        if title.is_empty() {
            return Err(self.fail(StoreError::validation("Title is required"), "add note"));
        }
        if description.is_empty() {
            return Err(self.fail(
                StoreError::validation("Description is required"),
                "add note",
            ));
        }

        let request = NewNote {
            title: title.to_string(),
            description: description.to_string(),
            category_id: draft.category_or(self.fallback_id),
            tags: draft.tags.clone(),
        };

        match self.backend.create_note(&request).await {
            Ok(record) => {
                let note = normalize_note(record, self.fallback_category(), Utc::now());
                self.notes.push(note.clone());
                self.succeed();
                info!(id = %note.id(), "added note");
                Ok(note)
            }
            Err(err) => Err(self.fail(err.into(), "add note")),
        }
    }

    /// Replaces the title, description, category and tags of note `id`.
    pub async fn update(&mut self, id: NoteId, draft: NoteDraft) -> StoreResult<Note> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(self.fail(StoreError::validation("Title is required"), "update note"));
        }

        let request = NoteReplace {
            id,
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            category_id: draft.category_or(self.fallback_id),
            tags: draft.tags.clone(),
        };

        match self.backend.replace_note(id, &request).await {
            Ok(record) => {
                let note = normalize_note(record, self.fallback_category(), Utc::now());
                match self.notes.iter_mut().find(|n| n.id() == id) {
                    Some(slot) => *slot = note.clone(),
                    None => self.notes.push(note.clone()),
                }
                self.succeed();
                info!(id = %id, "updated note");
                Ok(note)
            }
            Err(err) => Err(self.fail(err.into(), "update note")),
        }
    }

    /// Deletes note `id` and drops it from the collection.
    pub async fn delete(&mut self, id: NoteId) -> StoreResult<()> {
        match self.backend.delete_note(id).await {
            Ok(()) => {
                self.notes.retain(|n| n.id() != id);
                self.succeed();
                info!(id = %id, "deleted note");
                Ok(())
            }
            Err(err) => Err(self.fail(err.into(), "delete note")),
        }
    }

    /// Looks up a note by id.
    pub fn get_by_id(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    /// Returns the notes in `category_id`, or every note for `All`.
    pub fn get_by_category(&self, category_id: CategoryId) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| category_id.is_all() || n.category_id() == category_id)
            .collect()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Incremented on every change to the collection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn fallback_category(&self) -> CategoryId {
        CategoryId::Id(self.fallback_id)
    }

    fn succeed(&mut self) {
        self.last_error = None;
        self.revision += 1;
    }

    fn fail(&mut self, err: StoreError, action: &str) -> StoreError {
        warn!(error = %err, "failed to {}", action);
        self.last_error = Some(err.to_string());
        err
    }
}

/// Turns a backend record into a [`Note`].
///
/// Missing or sentinel categories become `fallback`; a missing or unparseable
/// `updated_at` becomes `now`.
pub(crate) fn normalize_note(
    record: NoteRecord,
    fallback: CategoryId,
    now: DateTime<Utc>,
) -> Note {
    let category_id = record
        .category_ref()
        .unwrap_or(fallback)
        .or_fallback(fallback);
    let tags = record.tag_strings();
    let category_name = record.category_name();
    let created_at = record.created();
    let updated_at = record.updated().unwrap_or(now);

    Note::builder(record.id, record.title.unwrap_or_default())
        .description(record.description.unwrap_or_default())
        .category_id(category_id)
        .category_name(category_name)
        .tags(tags)
        .created_at(created_at)
        .updated_at(updated_at)
        .build()
}
