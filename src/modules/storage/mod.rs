pub mod backend;

// Re-export the main types and functions
pub use backend::{FileBackend, MemoryBackend, NullBackend, StorageBackend};
