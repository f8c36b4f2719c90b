//! Builders for server-side note and category records.

#![allow(dead_code)]

use serde_json::{Value, json};

/// A note as the server would return it, with sensible defaults.
#[derive(Debug, Clone)]
pub struct TestNote {
    id: u64,
    title: String,
    description: String,
    category_id: u64,
    category: Option<String>,
    tags: Vec<String>,
    updated_at: String,
}

impl TestNote {
    /// Creates a note in category 1 with a fixed timestamp.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category_id: 1,
            category: None,
            tags: Vec::new(),
            updated_at: "2024-01-15T10:30:00Z".to_string(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category id and the embedded category name.
    pub fn category(mut self, id: u64, name: impl Into<String>) -> Self {
        self.category_id = id;
        self.category = Some(name.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = updated_at.into();
        self
    }

    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "id": self.id,
            "title": self.title,
            "description": self.description,
            "category_id": self.category_id,
            "updated_at": self.updated_at,
        });
        if let Some(name) = &self.category {
            value["category"] = json!(name);
        }
        if !self.tags.is_empty() {
            value["tags"] = json!(self.tags);
        }
        value
    }
}

/// A category as the server would return it.
#[derive(Debug, Clone)]
pub struct TestCategory {
    id: u64,
    name: String,
    color: String,
}

impl TestCategory {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: "#9e9e9e".to_string(),
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn to_json(&self) -> Value {
        json!({ "id": self.id, "name": self.name, "color": self.color })
    }
}
