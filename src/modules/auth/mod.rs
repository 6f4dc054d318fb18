pub mod credentials;
pub mod service;
pub mod session;
pub mod tokens;
pub mod validate;

// Re-export the main types and functions
pub use credentials::{CredentialStore, User};
pub use service::{AuthResponse, AuthService};
pub use session::SessionState;
pub use tokens::{PasswordResetRecord, ResetTokenStore};
pub use validate::{is_valid_email, normalize_email, ValidationError};
