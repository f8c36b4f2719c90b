//! Category records and the inputs used to create or change them.

use crate::domain::CategoryId;
use serde::Serialize;
use std::fmt;

/// Neutral gray used when a category has no color.
pub const DEFAULT_COLOR: &str = "#9e9e9e";

/// Display name of the synthetic "All" category.
pub const ALL_NAME: &str = "All";

/// A named, colored label notes are assigned to.
///
/// The category collection also holds one synthetic entry built by
/// [`Category::all`]; it is used for filtering only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    color: String,
}

impl Category {
    /// Creates a category. An empty color is replaced with [`DEFAULT_COLOR`].
    pub fn new(id: CategoryId, name: impl Into<String>, color: impl Into<String>) -> Self {
        let color = color.into();
        let color = if color.trim().is_empty() {
            DEFAULT_COLOR.to_string()
        } else {
            color.trim().to_string()
        };
        Self {
            id,
            name: name.into(),
            color,
        }
    }

    /// The synthetic "All" entry.
    pub fn all() -> Self {
        Self::new(CategoryId::All, ALL_NAME, DEFAULT_COLOR)
    }

    /// Hardcoded category set used when the backend cannot be reached.
    pub fn defaults() -> Vec<Category> {
        vec![Category::new(CategoryId::FALLBACK, "Misc", DEFAULT_COLOR)]
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns true for the synthetic "All" entry.
    pub fn is_all(&self) -> bool {
        self.id.is_all()
    }

    /// Case-insensitive name comparison used for duplicate detection.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}

/// Input for creating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    /// `None` means [`DEFAULT_COLOR`].
    pub color: Option<String>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Partial update of a category; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}
