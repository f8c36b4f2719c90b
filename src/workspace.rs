//! Workspace: both stores plus the current selection over one backend.

use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::NotesBackend;
use crate::domain::{Category, CategoryDraft, CategoryId, CategoryPatch, Note, NoteDraft, NoteId};
use crate::filter::{FilterCache, Selection};
use crate::store::{CategoryStore, NoteStore, StoreError, StoreResult};

/// Outcome of [`Workspace::load`]. Each store loads independently, so one
/// side can fail while the other succeeds.
#[derive(Debug)]
pub struct LoadReport {
    pub notes: StoreResult<usize>,
    pub categories: StoreResult<usize>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.notes.is_ok() && self.categories.is_ok()
    }

    /// The errors that occurred, notes first.
    pub fn errors(&self) -> Vec<&StoreError> {
        [self.notes.as_ref().err(), self.categories.as_ref().err()]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Everything a front end needs: notes, categories, and what is selected.
pub struct Workspace {
    notes: NoteStore,
    categories: CategoryStore,
    selection: Selection,
    cache: FilterCache,
}

impl Workspace {
    pub fn new(backend: Arc<dyn NotesBackend>, fallback_category: CategoryId) -> Self {
        Self {
            notes: NoteStore::new(backend.clone(), fallback_category),
            categories: CategoryStore::new(backend),
            selection: Selection::default(),
            cache: FilterCache::new(),
        }
    }

    /// Overrides the color given to categories created without one.
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.categories = self.categories.with_default_color(color);
        self
    }

    /// Fetches notes and categories concurrently.
    pub async fn load(&mut self) -> LoadReport {
        let (notes, categories) =
            tokio::join!(self.notes.fetch_all(), self.categories.fetch_all());
        let report = LoadReport {
            notes: notes.map(|n| n.len()),
            // "All" is not a fetched category.
            categories: categories.map(|c| c.len() - 1),
        };
        info!(
            notes = report.notes.as_ref().ok(),
            categories = report.categories.as_ref().ok(),
            "workspace loaded"
        );
        report
    }

    /// Re-fetches notes only.
    pub async fn refresh_notes(&mut self) -> StoreResult<usize> {
        self.notes.fetch_all().await.map(<[Note]>::len)
    }

    /// Re-fetches categories only.
    pub async fn refresh_categories(&mut self) -> StoreResult<usize> {
        self.categories.fetch_all().await.map(|c| c.len() - 1)
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.selection.query = query.into();
    }

    pub fn select_category(&mut self, category: CategoryId) {
        self.selection.category = category;
    }

    /// Notes matching the current selection, in collection order.
    pub fn visible_notes(&mut self) -> Vec<&Note> {
        self.cache.visible(
            self.notes.notes(),
            self.notes.revision(),
            self.categories.categories(),
            self.categories.revision(),
            &self.selection,
        )
    }

    /// Categories a note can be assigned to ("All" excluded).
    pub fn category_choices(&self) -> Vec<&Category> {
        self.categories.choices()
    }

    pub async fn add_note(&mut self, draft: NoteDraft) -> StoreResult<Note> {
        self.notes.add(draft).await
    }

    pub async fn update_note(&mut self, id: NoteId, draft: NoteDraft) -> StoreResult<Note> {
        self.notes.update(id, draft).await
    }

    pub async fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        self.notes.delete(id).await
    }

    pub async fn add_category(&mut self, draft: CategoryDraft) -> StoreResult<Category> {
        self.categories.add(draft).await
    }

    pub async fn update_category(
        &mut self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> StoreResult<Category> {
        self.categories.update(id, patch).await
    }

    /// Deletes a category, moving its notes to `target` when given.
    ///
    /// On success the selection falls back to "All" if the deleted category
    /// was selected, and notes are re-fetched when a target was given since
    /// the backend reassigned them. A failed re-fetch is logged and left in
    /// the note store's error state; the delete itself still succeeded.
    pub async fn delete_category(
        &mut self,
        id: CategoryId,
        target: Option<CategoryId>,
    ) -> StoreResult<()> {
        self.categories.delete(id, target).await?;

        if self.selection.category == id {
            self.selection.category = CategoryId::All;
        }
        if target.is_some() {
            if let Err(err) = self.notes.fetch_all().await {
                warn!(error = %err, "failed to refresh notes after category reassignment");
            }
        }
        Ok(())
    }
}
