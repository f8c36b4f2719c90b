//! Store error taxonomy.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors surfaced by the note and category stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was missing or invalid; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The backend rejected the request or could not be reached.
    #[error("{0}")]
    Backend(BackendError),

    /// A category delete was blocked by notes that still reference it.
    #[error("{message}")]
    Conflict {
        message: String,
        note_count: Option<u64>,
    },
}

impl StoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }

    /// Number of dependent notes reported with a conflict.
    pub fn note_count(&self) -> Option<u64> {
        match self {
            StoreError::Conflict { note_count, .. } => *note_count,
            _ => None,
        }
    }
}

impl From<BackendError> for StoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Conflict {
                message,
                note_count,
                ..
            } => StoreError::Conflict {
                message,
                note_count,
            },
            other => StoreError::Backend(other),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn backend_conflicts_become_store_conflicts() {
        let err: StoreError = BackendError::Conflict {
            status: 400,
            message: "has notes".to_string(),
            note_count: Some(2),
        }
        .into();
        assert!(err.is_conflict());
        assert_eq!(err.note_count(), Some(2));
        assert_eq!(err.to_string(), "has notes");
    }

    #[test]
    fn other_backend_errors_keep_their_message() {
        let err: StoreError = BackendError::Status {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(!err.is_conflict());
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn validation_errors_have_no_note_count() {
        let err = StoreError::validation("Title is required");
        assert!(err.is_validation());
        assert_eq!(err.note_count(), None);
    }
}
