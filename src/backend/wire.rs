//! Request and response bodies exchanged with the REST backend.
//!
//! Response records are deliberately loose: variants of the backend disagree
//! on field names and types, so everything but the note id is optional and
//! the stores normalize records into domain types.

use crate::domain::{CategoryId, NoteId, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A note as returned by `GET/POST/PUT /api/notes`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NoteRecord {
    pub id: NoteId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Value>,
    /// Either the category display name or, in older payloads, its id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Value>>,
    #[serde(
        default,
        alias = "created_on",
        alias = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(
        default,
        alias = "updated_on",
        alias = "updatedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}

impl NoteRecord {
    /// Resolves the category reference, preferring `category_id` and falling
    /// back to a numeric `category` field.
    pub fn category_ref(&self) -> Option<CategoryId> {
        let from_id = self.category_id.as_ref().and_then(category_from_value);
        from_id.or_else(|| match &self.category {
            Some(value @ Value::Number(_)) => category_from_value(value),
            _ => None,
        })
    }

    /// Returns the embedded category display name, if the record has one.
    pub fn category_name(&self) -> Option<String> {
        match &self.category {
            Some(Value::String(name)) if !name.trim().is_empty() => Some(name.clone()),
            _ => None,
        }
    }

    /// Returns the string tags, skipping anything that is not a string.
    pub fn tag_strings(&self) -> Vec<String> {
        self.tags
            .iter()
            .flatten()
            .filter_map(|tag| tag.as_str())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }
}

/// A category as returned by `GET/POST/PUT /api/categories`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CategoryRecord {
    /// Returns the decoded id, or `None` if it is missing or invalid.
    pub fn category_id(&self) -> Option<CategoryId> {
        self.id.as_ref().and_then(category_from_value)
    }
}

/// Body of `POST /api/notes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub description: String,
    pub category_id: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Body of `PUT /api/notes/{id}`: the full note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteReplace {
    pub id: NoteId,
    pub title: String,
    pub description: String,
    pub category_id: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Body of `POST /api/categories`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

/// Body of `DELETE /api/categories/{id}` when notes must be reassigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteCategory {
    #[serde(rename = "targetCategoryId")]
    pub target_category_id: u64,
}

/// Error payload convention: `{ "error": string, "noteCount"?: number }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "noteCount")]
    pub note_count: Option<u64>,
}

fn category_from_value(value: &Value) -> Option<CategoryId> {
    CategoryId::deserialize(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn note_record_accepts_minimal_payload() {
        let record: NoteRecord = serde_json::from_value(json!({"id": 3})).unwrap();
        assert_eq!(record.id, NoteId::new(3));
        assert_eq!(record.category_ref(), None);
        assert!(record.tag_strings().is_empty());
        assert!(record.updated().is_none());
    }

    #[test]
    fn note_record_reads_embedded_category_name() {
        let record: NoteRecord = serde_json::from_value(json!({
            "id": 1,
            "category": "Home",
            "category_id": 2,
            "updated_at": "2024-01-01T00:00:00.000000Z"
        }))
        .unwrap();
        assert_eq!(record.category_ref(), Some(CategoryId::Id(2)));
        assert_eq!(record.category_name(), Some("Home".to_string()));
        assert!(record.updated().is_some());
    }

    #[test]
    fn numeric_category_field_is_a_reference() {
        let record: NoteRecord =
            serde_json::from_value(json!({"id": 1, "category": 4})).unwrap();
        assert_eq!(record.category_ref(), Some(CategoryId::Id(4)));
        assert_eq!(record.category_name(), None);
    }

    #[test]
    fn string_category_id_is_coerced() {
        let record: NoteRecord =
            serde_json::from_value(json!({"id": 1, "category_id": "5"})).unwrap();
        assert_eq!(record.category_ref(), Some(CategoryId::Id(5)));
    }

    #[test]
    fn timestamp_aliases_are_accepted() {
        let record: NoteRecord = serde_json::from_value(json!({
            "id": 1,
            "created_on": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        }))
        .unwrap();
        assert!(record.created().is_some());
        assert!(record.updated().is_some());
    }

    #[test]
    fn non_string_tags_are_skipped() {
        let record: NoteRecord =
            serde_json::from_value(json!({"id": 1, "tags": ["a", 3, null, "b", ""]})).unwrap();
        assert_eq!(record.tag_strings(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn category_record_with_bad_id_has_no_category_id() {
        let record: CategoryRecord =
            serde_json::from_value(json!({"id": "x", "name": "Broken"})).unwrap();
        assert_eq!(record.category_id(), None);
    }

    #[test]
    fn delete_body_uses_camel_case_key() {
        let body = DeleteCategory {
            target_category_id: 2,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"targetCategoryId": 2})
        );
    }

    #[test]
    fn new_note_omits_empty_tags() {
        let body = NewNote {
            title: "t".to_string(),
            description: "d".to_string(),
            category_id: 1,
            tags: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"title": "t", "description": "d", "category_id": 1})
        );
    }
}
