//! Backend-synchronized collections of notes and categories.

mod categories;
mod error;
mod notes;

pub use categories::CategoryStore;
pub use error::{StoreError, StoreResult};
pub use notes::NoteStore;
