pub mod model;
pub mod store;

// Re-export the main types and functions
pub use model::Note;
pub use store::{generate_note_id, NoteStore};
