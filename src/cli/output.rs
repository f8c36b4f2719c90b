//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Category, CategoryId, Note};
use crate::store::CategoryStore;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub category: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub updated_at: String,
}

impl NoteListing {
    /// Builds a listing, naming the category from the store when possible.
    pub fn new(note: &Note, categories: &CategoryStore) -> Self {
        let category = categories
            .name_of(note.category_id())
            .or_else(|| note.category_name())
            .unwrap_or_default()
            .to_string();
        Self {
            id: note.id().get(),
            title: note.title().to_string(),
            description: note.description().to_string(),
            category_id: note.category_id(),
            category,
            tags: note.tags().to_vec(),
            updated_at: note.updated_at().to_rfc3339(),
        }
    }
}

/// A category with optional note count.
#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl CategoryListing {
    pub fn new(category: &Category, count: Option<usize>) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
            color: category.color().to_string(),
            count,
        }
    }
}
