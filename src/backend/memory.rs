//! In-process backend with the same rules as the notes server.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{
    BackendError, BackendResult, CategoryRecord, NewCategory, NewNote, NoteRecord, NoteReplace,
    NotesBackend,
};
use crate::domain::{CategoryPatch, NoteId};

const DEFAULT_CATEGORY_ID: u64 = 1;
const CONFLICT_MESSAGE: &str =
    "Cannot delete category that has associated notes. Please reassign or delete the notes first.";

#[derive(Debug, Clone)]
struct StoredNote {
    id: u64,
    title: String,
    description: String,
    category_id: u64,
    tags: Vec<String>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredCategory {
    id: u64,
    name: String,
    color: String,
}

#[derive(Debug, Default)]
struct State {
    notes: Vec<StoredNote>,
    categories: Vec<StoredCategory>,
    last_note_id: u64,
    last_category_id: u64,
    offline: bool,
    requests: usize,
}

impl State {
    fn category_name(&self, id: u64) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    fn name_taken(&self, name: &str, except: Option<u64>) -> bool {
        let wanted = name.trim().to_lowercase();
        self.categories
            .iter()
            .filter(|c| Some(c.id) != except)
            .any(|c| c.name.to_lowercase() == wanted)
    }

    fn note_record(&self, note: &StoredNote) -> NoteRecord {
        NoteRecord {
            id: NoteId::new(note.id),
            title: Some(note.title.clone()),
            description: Some(note.description.clone()),
            category_id: Some(Value::from(note.category_id)),
            category: self.category_name(note.category_id).map(Value::from),
            tags: (!note.tags.is_empty())
                .then(|| note.tags.iter().cloned().map(Value::from).collect()),
            created_at: None,
            updated_at: Some(note.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        }
    }
}

fn category_record(category: &StoredCategory) -> CategoryRecord {
    CategoryRecord {
        id: Some(Value::from(category.id)),
        name: Some(category.name.clone()),
        color: Some(category.color.clone()),
    }
}

fn bad_request(message: &str) -> BackendError {
    BackendError::Status {
        status: 400,
        message: message.to_string(),
    }
}

fn not_found(what: &str) -> BackendError {
    BackendError::Status {
        status: 404,
        message: format!("{} not found", what),
    }
}

/// A backend that keeps notes and categories in memory.
///
/// Follows the server's rules: ids auto-increment, note creation requires a
/// title and description, category names are unique (case-insensitive), and
/// deleting a category that still has notes requires a valid reassignment
/// target.
///
/// # Examples
///
/// ```
/// use notekeeper::backend::InMemoryBackend;
///
/// let backend = InMemoryBackend::new();
/// let misc = backend.seed_category("Misc", "#9e9e9e");
/// let note = backend.seed_note("Groceries", "milk", misc);
/// assert_eq!(note.get(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Counts the request and fails it if the backend is offline.
    fn begin(&self) -> BackendResult<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.requests += 1;
        if state.offline {
            return Err(BackendError::Status {
                status: 503,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(state)
    }

    /// Inserts a category directly, bypassing validation. Returns its id.
    pub fn seed_category(&self, name: &str, color: &str) -> u64 {
        let mut state = self.lock();
        state.last_category_id += 1;
        let id = state.last_category_id;
        state.categories.push(StoredCategory {
            id,
            name: name.to_string(),
            color: color.to_string(),
        });
        id
    }

    /// Inserts a note directly, bypassing validation. Returns its id.
    pub fn seed_note(&self, title: &str, description: &str, category_id: u64) -> NoteId {
        self.seed_tagged_note(title, description, category_id, &[])
    }

    /// Inserts a note with tags directly. Returns its id.
    pub fn seed_tagged_note(
        &self,
        title: &str,
        description: &str,
        category_id: u64,
        tags: &[&str],
    ) -> NoteId {
        let mut state = self.lock();
        state.last_note_id += 1;
        let id = state.last_note_id;
        state.notes.push(StoredNote {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category_id,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            updated_at: Utc::now(),
        });
        NoteId::new(id)
    }

    /// Makes every subsequent call fail with a 503 until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Number of calls received so far, including failed ones.
    pub fn request_count(&self) -> usize {
        self.lock().requests
    }

    /// Number of notes currently assigned to `category_id`.
    pub fn notes_in_category(&self, category_id: u64) -> usize {
        self.lock()
            .notes
            .iter()
            .filter(|n| n.category_id == category_id)
            .count()
    }
}

#[async_trait]
impl NotesBackend for InMemoryBackend {
    async fn list_notes(&self) -> BackendResult<Vec<NoteRecord>> {
        let state = self.begin()?;
        Ok(state.notes.iter().map(|n| state.note_record(n)).collect())
    }

    async fn create_note(&self, note: &NewNote) -> BackendResult<NoteRecord> {
        let mut state = self.begin()?;
        let title = note.title.trim();
        let description = note.description.trim();
        if title.is_empty() {
            return Err(bad_request("Title is required"));
        }
        if description.is_empty() {
            return Err(bad_request("Description is required"));
        }

        state.last_note_id += 1;
        let stored = StoredNote {
            id: state.last_note_id,
            title: title.to_string(),
            description: description.to_string(),
            category_id: if note.category_id == 0 {
                DEFAULT_CATEGORY_ID
            } else {
                note.category_id
            },
            tags: note.tags.clone(),
            updated_at: Utc::now(),
        };
        let record = state.note_record(&stored);
        state.notes.push(stored);
        Ok(record)
    }

    async fn replace_note(&self, id: NoteId, note: &NoteReplace) -> BackendResult<NoteRecord> {
        let mut state = self.begin()?;
        let stored = state
            .notes
            .iter_mut()
            .find(|n| n.id == id.get())
            .ok_or_else(|| not_found("Note"))?;
        stored.title = note.title.clone();
        stored.description = note.description.clone();
        stored.category_id = note.category_id;
        stored.tags = note.tags.clone();
        stored.updated_at = Utc::now();
        let stored = stored.clone();
        Ok(state.note_record(&stored))
    }

    async fn delete_note(&self, id: NoteId) -> BackendResult<()> {
        let mut state = self.begin()?;
        let position = state
            .notes
            .iter()
            .position(|n| n.id == id.get())
            .ok_or_else(|| not_found("Note"))?;
        state.notes.remove(position);
        Ok(())
    }

    async fn list_categories(&self) -> BackendResult<Vec<CategoryRecord>> {
        let state = self.begin()?;
        Ok(state.categories.iter().map(category_record).collect())
    }

    async fn create_category(&self, category: &NewCategory) -> BackendResult<CategoryRecord> {
        let mut state = self.begin()?;
        let name = category.name.trim();
        let color = category.color.trim();
        if name.is_empty() || color.is_empty() {
            return Err(bad_request("Name and color are required"));
        }
        if state.name_taken(name, None) {
            return Err(bad_request("A category with this name already exists"));
        }

        state.last_category_id += 1;
        let stored = StoredCategory {
            id: state.last_category_id,
            name: name.to_string(),
            color: color.to_string(),
        };
        let record = category_record(&stored);
        state.categories.push(stored);
        Ok(record)
    }

    async fn update_category(
        &self,
        id: u64,
        patch: &CategoryPatch,
    ) -> BackendResult<CategoryRecord> {
        let mut state = self.begin()?;
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(bad_request("Name cannot be empty"));
            }
            if state.name_taken(name, Some(id)) {
                return Err(bad_request("A category with this name already exists"));
            }
        }

        let stored = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Category"))?;
        if let Some(name) = &patch.name {
            stored.name = name.trim().to_string();
        }
        if let Some(color) = &patch.color {
            stored.color = color.trim().to_string();
        }
        Ok(category_record(stored))
    }

    async fn delete_category(&self, id: u64, target: Option<u64>) -> BackendResult<()> {
        let mut state = self.begin()?;
        let position = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| not_found("Category"))?;

        let note_count = state.notes.iter().filter(|n| n.category_id == id).count() as u64;
        if note_count > 0 {
            let valid_target =
                target.filter(|t| *t != id && state.categories.iter().any(|c| c.id == *t));
            match valid_target {
                Some(target) => {
                    let now = Utc::now();
                    for note in state.notes.iter_mut().filter(|n| n.category_id == id) {
                        note.category_id = target;
                        note.updated_at = now;
                    }
                }
                None => {
                    return Err(BackendError::Conflict {
                        status: 400,
                        message: CONFLICT_MESSAGE.to_string(),
                        note_count: Some(note_count),
                    });
                }
            }
        }

        state.categories.remove(position);
        Ok(())
    }
}
