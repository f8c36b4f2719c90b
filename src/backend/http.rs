//! reqwest-based backend talking to the notes REST API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::{
    BackendError, BackendResult, CategoryRecord, DeleteCategory, NewCategory, NewNote,
    NoteRecord, NoteReplace, NotesBackend,
};
use crate::domain::{CategoryPatch, NoteId};

const NOTES_PATH: &str = "/api/notes";
const CATEGORIES_PATH: &str = "/api/categories";

/// A backend reached over HTTP.
///
/// `base_url` is the server root (e.g. `http://localhost:5000`); endpoint
/// paths under `/api` are appended to it.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a backend with the given base URL and per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a backend around an existing client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder, endpoint: &str) -> BackendResult<Response> {
        debug!(endpoint, "sending request");
        let response = request.send().await?;
        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "received response");

        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or("request failed");
        let body = response.bytes().await.unwrap_or_default();
        Err(BackendError::from_response(status.as_u16(), &body, reason))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> BackendResult<T> {
        let response = self.execute(request, endpoint).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| BackendError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl NotesBackend for HttpBackend {
    async fn list_notes(&self) -> BackendResult<Vec<NoteRecord>> {
        let request = self.client.get(self.url(NOTES_PATH));
        self.fetch(request, "GET /api/notes").await
    }

    async fn create_note(&self, note: &NewNote) -> BackendResult<NoteRecord> {
        let request = self.client.post(self.url(NOTES_PATH)).json(note);
        self.fetch(request, "POST /api/notes").await
    }

    async fn replace_note(&self, id: NoteId, note: &NoteReplace) -> BackendResult<NoteRecord> {
        let path = format!("{}/{}", NOTES_PATH, id);
        let request = self.client.put(self.url(&path)).json(note);
        self.fetch(request, &format!("PUT {}", path)).await
    }

    async fn delete_note(&self, id: NoteId) -> BackendResult<()> {
        let path = format!("{}/{}", NOTES_PATH, id);
        let request = self.client.delete(self.url(&path));
        self.execute(request, &format!("DELETE {}", path)).await?;
        Ok(())
    }

    async fn list_categories(&self) -> BackendResult<Vec<CategoryRecord>> {
        let request = self.client.get(self.url(CATEGORIES_PATH));
        self.fetch(request, "GET /api/categories").await
    }

    async fn create_category(&self, category: &NewCategory) -> BackendResult<CategoryRecord> {
        let request = self.client.post(self.url(CATEGORIES_PATH)).json(category);
        self.fetch(request, "POST /api/categories").await
    }

    async fn update_category(
        &self,
        id: u64,
        patch: &CategoryPatch,
    ) -> BackendResult<CategoryRecord> {
        let path = format!("{}/{}", CATEGORIES_PATH, id);
        let request = self.client.put(self.url(&path)).json(patch);
        self.fetch(request, &format!("PUT {}", path)).await
    }

    async fn delete_category(&self, id: u64, target: Option<u64>) -> BackendResult<()> {
        let path = format!("{}/{}", CATEGORIES_PATH, id);
        let mut request = self.client.delete(self.url(&path));
        if let Some(target_category_id) = target {
            request = request.json(&DeleteCategory { target_category_id });
        }
        self.execute(request, &format!("DELETE {}", path)).await?;
        Ok(())
    }
}
