//! Command handlers for the CLI.

mod categories;
mod completions;
mod notes;
mod resolve;


use anyhow::{Context, Result};
use std::sync::Arc;

use crate::backend::HttpBackend;
use crate::cli::config::Config;
use crate::workspace::Workspace;

// Re-export public items
pub use categories::{
    handle_categories, handle_category_add, handle_category_edit, handle_category_rm,
};
pub use completions::handle_completions;
pub use notes::{handle_add, handle_edit, handle_list, handle_rm, handle_search, handle_show};
pub use resolve::{parse_note_id, resolve_category, resolve_category_filter};

// ===========================================
// Shared Utilities
// ===========================================

/// Builds a workspace talking to the server at `api_url`.
pub fn open_workspace(config: &Config, api_url: &str) -> Result<Workspace> {
    let backend = HttpBackend::new(api_url, config.timeout())
        .with_context(|| format!("failed to create HTTP client for {api_url}"))?;
    Ok(
        Workspace::new(Arc::new(backend), config.fallback_category())
            .with_default_color(config.default_color()),
    )
}

/// Loads notes and categories. A category failure only warns since the
/// store falls back to its defaults.
pub(crate) async fn load_workspace(workspace: &mut Workspace) -> Result<()> {
    let report = workspace.load().await;
    report.notes.context("failed to fetch notes")?;
    if let Err(err) = report.categories {
        eprintln!("warning: failed to fetch categories ({err}); using defaults");
    }
    Ok(())
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
