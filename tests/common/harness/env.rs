//! Isolated test environment: a mock notes server plus a temp home directory.

#![allow(dead_code)]

use super::{NotesCommand, TestCategory, TestNote};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment.
///
/// Owns a mockito server standing in for the notes API and a temp directory
/// used as `HOME`, so config files written here are the only ones the binary
/// sees. Both are cleaned up on drop.
pub struct TestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    server: ServerGuard,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let home = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            home,
            server: Server::new(),
        }
    }

    /// Base URL of the mock server.
    pub fn url(&self) -> String {
        self.server.url()
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Direct access to the mock server for custom expectations.
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    /// Writes `~/.config/notekeeper/config.toml` and returns its path.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.home.join(".config").join("notekeeper");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// A command pointed at the mock server.
    pub fn cmd(&self) -> NotesCommand {
        self.cmd_without_url().api_url(&self.url())
    }

    /// A command with no `--api-url`, for exercising config resolution.
    pub fn cmd_without_url(&self) -> NotesCommand {
        NotesCommand::new().home(&self.home)
    }

    // ===========================================
    // Canned endpoints
    // ===========================================

    /// Serves `notes` from `GET /api/notes`.
    pub fn serve_notes(&mut self, notes: &[TestNote]) -> Mock {
        let body: Vec<Value> = notes.iter().map(TestNote::to_json).collect();
        self.serve_json("GET", "/api/notes", 200, json!(body))
    }

    /// Serves `categories` from `GET /api/categories`.
    pub fn serve_categories(&mut self, categories: &[TestCategory]) -> Mock {
        let body: Vec<Value> = categories.iter().map(TestCategory::to_json).collect();
        self.serve_json("GET", "/api/categories", 200, json!(body))
    }

    /// Responds to `method path` with `status` and a JSON body.
    pub fn serve_json(&mut self, method: &str, path: &str, status: usize, body: Value) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create()
    }

    /// Expects `method path` with a JSON body containing `expected`.
    pub fn expect_json(
        &mut self,
        method: &str,
        path: &str,
        expected: Value,
        status: usize,
        response: Value,
    ) -> Mock {
        self.server
            .mock(method, path)
            .match_body(Matcher::PartialJson(expected))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(response.to_string())
            .create()
    }

    /// Registers a mock that must never be hit.
    pub fn forbid(&mut self, method: &str, path: impl Into<Matcher>) -> Mock {
        self.server.mock(method, path).expect(0).create()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
