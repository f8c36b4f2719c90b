//! Category Store: the category collection, always led by the "All" entry.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{StoreError, StoreResult};
use crate::backend::{BackendError, CategoryRecord, NewCategory, NotesBackend};
use crate::domain::{
    ALL_NAME, Category, CategoryDraft, CategoryId, CategoryPatch, DEFAULT_COLOR,
};

/// Holds the category collection and keeps it in step with the backend.
///
/// The first entry is always the synthetic "All" category and no other entry
/// uses the sentinel id. Local state changes only after the backend confirms
/// a request.
pub struct CategoryStore {
    backend: Arc<dyn NotesBackend>,
    default_color: String,
    categories: Vec<Category>,
    last_error: Option<String>,
    revision: u64,
}

impl CategoryStore {
    /// Creates a store holding only the "All" entry.
    pub fn new(backend: Arc<dyn NotesBackend>) -> Self {
        Self {
            backend,
            default_color: DEFAULT_COLOR.to_string(),
            categories: vec![Category::all()],
            last_error: None,
            revision: 0,
        }
    }

    /// Overrides the color given to categories created without one.
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        if !color.trim().is_empty() {
            self.default_color = color.trim().to_string();
        }
        self
    }

    /// Replaces the collection with the backend's categories.
    ///
    /// On failure the collection becomes "All" plus [`Category::defaults`] and
    /// the error is returned.
    pub async fn fetch_all(&mut self) -> StoreResult<&[Category]> {
        match self.backend.list_categories().await {
            Ok(records) => {
                let fetched: Vec<Category> = records
                    .into_iter()
                    .filter_map(|r| self.normalize(r))
                    .collect();
                self.install(fetched);
                self.last_error = None;
                debug!(count = self.categories.len() - 1, "fetched categories");
                Ok(&self.categories)
            }
            Err(err) => {
                self.install(Category::defaults());
                Err(self.fail(err.into(), "fetch categories"))
            }
        }
    }

    /// Creates a category and appends it after the existing entries.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] without contacting the backend if the
    /// name is empty, is the reserved "All", or is already used by another
    /// category (case-insensitive).
    pub async fn add(&mut self, draft: CategoryDraft) -> StoreResult<Category> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(self.fail(StoreError::validation("Name is required"), "add category"));
        }
        if is_reserved(name) {
            return Err(self.fail(reserved_name_error(), "add category"));
        }
        if self.name_taken(name, None) {
            let err =
                StoreError::validation(format!("A category named '{}' already exists", name));
            return Err(self.fail(err, "add category"));
        }

        let color = draft
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.default_color)
            .to_string();
        let request = NewCategory {
            name: name.to_string(),
            color,
        };

        match self.backend.create_category(&request).await {
            Ok(record) => match self.normalize(record) {
                Some(category) => {
                    self.categories.push(category.clone());
                    self.succeed();
                    info!(id = %category.id(), name = category.name(), "added category");
                    Ok(category)
                }
                None => {
                    let err = BackendError::Decode {
                        endpoint: "POST /api/categories".to_string(),
                        reason: "created category has no usable id or name".to_string(),
                    };
                    Err(self.fail(err.into(), "add category"))
                }
            },
            Err(err) => Err(self.fail(err.into(), "add category")),
        }
    }

    /// Applies a partial update to category `id`.
    pub async fn update(
        &mut self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> StoreResult<Category> {
        let Some(raw_id) = id.real() else {
            return Err(self.fail(
                StoreError::validation("The All category cannot be modified"),
                "update category",
            ));
        };
        if let Some(name) = patch.name.as_deref() {
            if name.trim().is_empty() {
                return Err(self.fail(
                    StoreError::validation("Name cannot be empty"),
                    "update category",
                ));
            }
            if is_reserved(name) {
                return Err(self.fail(reserved_name_error(), "update category"));
            }
            if self.name_taken(name, Some(id)) {
                let err = StoreError::validation(format!(
                    "A category named '{}' already exists",
                    name.trim()
                ));
                return Err(self.fail(err, "update category"));
            }
        }

        match self.backend.update_category(raw_id, &patch).await {
            Ok(record) => {
                // Some backends answer with a partial record; keep what we know.
                let previous = self.get_by_id(id).cloned();
                let name = record
                    .name
                    .or_else(|| patch.name.clone())
                    .or_else(|| previous.as_ref().map(|c| c.name().to_string()))
                    .unwrap_or_default();
                let color = record
                    .color
                    .or_else(|| patch.color.clone())
                    .or_else(|| previous.as_ref().map(|c| c.color().to_string()))
                    .unwrap_or_else(|| self.default_color.clone());
                let category = Category::new(id, name.trim(), color);

                match self.categories.iter_mut().find(|c| c.id() == id) {
                    Some(slot) => *slot = category.clone(),
                    None => self.categories.push(category.clone()),
                }
                self.succeed();
                info!(id = %id, "updated category");
                Ok(category)
            }
            Err(err) => Err(self.fail(err.into(), "update category")),
        }
    }

    /// Deletes category `id`, asking the backend to move its notes to
    /// `target` when one is given.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] for the "All" category, or a target that
    ///   is "All" or `id` itself
    /// - [`StoreError::Conflict`] when notes still reference the category and
    ///   no usable target was given; the collection is left unchanged
    pub async fn delete(
        &mut self,
        id: CategoryId,
        target: Option<CategoryId>,
    ) -> StoreResult<()> {
        let Some(raw_id) = id.real() else {
            return Err(self.fail(
                StoreError::validation("The All category cannot be deleted"),
                "delete category",
            ));
        };
        let raw_target = match target {
            None => None,
            Some(t) if t == id => {
                return Err(self.fail(
                    StoreError::validation("Notes cannot be reassigned to the deleted category"),
                    "delete category",
                ));
            }
            Some(t) => match t.real() {
                Some(raw) => Some(raw),
                None => {
                    return Err(self.fail(
                        StoreError::validation("Notes cannot be reassigned to the All category"),
                        "delete category",
                    ));
                }
            },
        };

        match self.backend.delete_category(raw_id, raw_target).await {
            Ok(()) => {
                self.categories.retain(|c| c.id() != id);
                self.succeed();
                info!(id = %id, "deleted category");
                Ok(())
            }
            Err(err) => Err(self.fail(err.into(), "delete category")),
        }
    }

    /// Looks up a category by id.
    pub fn get_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id() == id)
    }

    /// Looks up a category from user input: an id (`"3"`, `" 3 "`, `"all"`)
    /// or, failing that, a case-insensitive name.
    pub fn lookup(&self, raw: &str) -> Option<&Category> {
        match raw.parse::<CategoryId>() {
            Ok(id) => self.get_by_id(id),
            Err(_) => self.categories.iter().find(|c| c.has_name(raw)),
        }
    }

    /// Returns the display name of category `id`.
    pub fn name_of(&self, id: CategoryId) -> Option<&str> {
        self.get_by_id(id).map(Category::name)
    }

    /// Real categories only, for assigning a note to a category.
    pub fn choices(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| !c.is_all()).collect()
    }

    /// The full collection, "All" first.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Incremented on every change to the collection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn install(&mut self, fetched: Vec<Category>) {
        let mut categories = Vec::with_capacity(fetched.len() + 1);
        categories.push(Category::all());
        categories.extend(fetched);
        self.categories = categories;
        self.revision += 1;
    }

    /// Converts a backend record, dropping records without a usable id and
    /// any server-side copy of "All".
    fn normalize(&self, record: CategoryRecord) -> Option<Category> {
        let id = record.category_id().filter(|id| !id.is_all())?;
        let name = record.name.unwrap_or_default();
        if is_reserved(&name) {
            return None;
        }
        let color = record.color.unwrap_or_else(|| self.default_color.clone());
        Some(Category::new(id, name.trim(), color))
    }

    fn name_taken(&self, name: &str, except: Option<CategoryId>) -> bool {
        self.categories
            .iter()
            .filter(|c| !c.is_all() && Some(c.id()) != except)
            .any(|c| c.has_name(name))
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

fn is_reserved(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(ALL_NAME)
}

fn reserved_name_error() -> StoreError {
    StoreError::validation(format!("'{}' is a reserved category name", ALL_NAME))
}
