//! Core types: Note, Category, NoteId, CategoryId (with the "All" sentinel)

mod category;
mod category_id;
mod note;
mod note_id;
mod timestamp;

pub use category::{ALL_NAME, Category, CategoryDraft, CategoryPatch, DEFAULT_COLOR};
pub use category_id::{CategoryId, ParseCategoryIdError};
pub use note::{Note, NoteBuilder, NoteDraft};
pub use note_id::{NoteId, ParseNoteIdError};
pub use timestamp::parse_timestamp;
