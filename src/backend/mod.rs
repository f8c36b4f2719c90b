//! Backend abstraction over the notes REST API.
//!
//! [`NotesBackend`] has one method per REST call. [`HttpBackend`] talks to a
//! real server; [`InMemoryBackend`] reproduces the server's behavior in
//! process.

mod http;
mod memory;
mod wire;

pub use http::HttpBackend;
pub use memory::InMemoryBackend;
pub use wire::{
    CategoryRecord, DeleteCategory, ErrorPayload, NewCategory, NewNote, NoteRecord, NoteReplace,
};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CategoryPatch, NoteId};

/// Errors returned by a backend call.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (connection, timeout, TLS).
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A category delete was refused because notes still reference it.
    #[error("{message}")]
    Conflict {
        status: u16,
        message: String,
        note_count: Option<u64>,
    },

    /// A success response body could not be decoded.
    #[error("invalid response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

impl BackendError {
    /// Classifies a non-success response from its status and body.
    ///
    /// The message comes from the payload's `error` (or `message`) field,
    /// falling back to `reason`. Payloads carrying `noteCount`, status 409,
    /// and messages about associated notes are conflicts.
    pub fn from_response(status: u16, body: &[u8], reason: &str) -> Self {
        let payload: ErrorPayload = serde_json::from_slice(body).unwrap_or_default();
        let message = payload
            .error
            .or(payload.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| reason.to_string());

        if payload.note_count.is_some()
            || status == 409
            || message.to_lowercase().contains("associated notes")
        {
            return BackendError::Conflict {
                status,
                message,
                note_count: payload.note_count,
            };
        }

        BackendError::Status { status, message }
    }

    /// Returns the HTTP status, if the backend responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Network(err) => err.status().map(|s| s.as_u16()),
            BackendError::Status { status, .. } | BackendError::Conflict { status, .. } => {
                Some(*status)
            }
            BackendError::Decode { .. } => None,
        }
    }
}

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// The REST surface the stores consume.
///
/// Category ids are plain `u64` here: the "All" sentinel has no server-side
/// representation and cannot be passed to any of these methods.
#[async_trait]
pub trait NotesBackend: Send + Sync {
    /// `GET /api/notes`
    async fn list_notes(&self) -> BackendResult<Vec<NoteRecord>>;

    /// `POST /api/notes`
    async fn create_note(&self, note: &NewNote) -> BackendResult<NoteRecord>;

    /// `PUT /api/notes/{id}`
    async fn replace_note(&self, id: NoteId, note: &NoteReplace) -> BackendResult<NoteRecord>;

    /// `DELETE /api/notes/{id}`
    async fn delete_note(&self, id: NoteId) -> BackendResult<()>;

    /// `GET /api/categories`
    async fn list_categories(&self) -> BackendResult<Vec<CategoryRecord>>;

    /// `POST /api/categories`
    async fn create_category(&self, category: &NewCategory) -> BackendResult<CategoryRecord>;

    /// `PUT /api/categories/{id}`
    async fn update_category(
        &self,
        id: u64,
        patch: &CategoryPatch,
    ) -> BackendResult<CategoryRecord>;

    /// `DELETE /api/categories/{id}`, moving dependent notes to `target` when
    /// one is given.
    async fn delete_category(&self, id: u64, target: Option<u64>) -> BackendResult<()>;
}
