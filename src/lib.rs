// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{
    auth,
    notes,
    router,
    storage,
    utils,
};

// Re-export commonly used types
pub use modules::auth::credentials::{CredentialStore, User};
pub use modules::auth::service::{AuthResponse, AuthService};
pub use modules::auth::session::SessionState;
pub use modules::notes::model::Note;
pub use modules::notes::store::NoteStore;
pub use modules::storage::StorageBackend;

// Storage keys for the persisted records
pub const USERS_KEY: &str = "trackrr_users";
pub const CURRENT_USER_KEY: &str = "trackrr_current_user";
pub const RESET_TOKENS_KEY: &str = "trackrr_reset_tokens";
pub const NOTES_KEY: &str = "daily_notes_v1";

// Account policy constants
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const RESET_TOKEN_EXPIRY_MS: u64 = 15 * 60 * 1000;

// Default data directory used by the CLI front-end
pub const DATA_DIR: &str = "trackrr_data";
