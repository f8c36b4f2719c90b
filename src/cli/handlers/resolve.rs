//! Resolution of user-supplied note and category identifiers.

use anyhow::{Context, Result, bail};

use crate::domain::{Category, CategoryId, NoteId};
use crate::store::CategoryStore;
use crate::workspace::Workspace;

/// Parses a note id argument.
pub fn parse_note_id(raw: &str) -> Result<NoteId> {
    raw.parse::<NoteId>()
        .with_context(|| format!("invalid note id: {}", raw.trim()))
}

/// Resolves a `--category` filter against already loaded categories.
///
/// `None` selects "All". Ids are taken as given, so an id the server does not
/// know simply matches nothing; names must match a loaded category.
pub fn resolve_category_filter(
    raw: Option<&str>,
    categories: &CategoryStore,
) -> Result<CategoryId> {
    let Some(raw) = raw else {
        return Ok(CategoryId::All);
    };
    if let Ok(id) = raw.parse::<CategoryId>() {
        return Ok(id);
    }
    match categories.lookup(raw) {
        Some(category) => Ok(category.id()),
        None => bail!("unknown category: {}", raw.trim()),
    }
}

/// Resolves a category argument (id or name), fetching categories when the
/// name is not already known.
pub async fn resolve_category(raw: &str, workspace: &mut Workspace) -> Result<CategoryId> {
    if let Ok(id) = raw.parse::<CategoryId>() {
        return Ok(id);
    }
    if workspace.categories().lookup(raw).is_none() {
        workspace
            .refresh_categories()
            .await
            .context("failed to fetch categories")?;
    }
    workspace
        .categories()
        .lookup(raw)
        .map(Category::id)
        .with_context(|| format!("unknown category: {}", raw.trim()))
}

/// Resolves a category argument that must name a real, loaded category.
pub(crate) fn existing_category(raw: &str, categories: &CategoryStore) -> Result<Category> {
    let category = categories
        .lookup(raw)
        .with_context(|| format!("unknown category: {}", raw.trim()))?;
    if category.is_all() {
        bail!("\"All\" is not a real category");
    }
    Ok(category.clone())
}
