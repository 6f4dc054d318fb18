use std::sync::Arc;

use super::credentials::{CredentialStore, User};
use super::session::SessionState;
use super::tokens::{generate_reset_token, PasswordResetRecord, ResetTokenStore};
use super::validate::{is_valid_email, normalize_email, validate_registration};
use crate::modules::router::Navigator;
use crate::modules::storage::StorageBackend;
use crate::modules::utils::logging::log_auth_event;
use crate::modules::utils::time::current_timestamp_millis;
use crate::{MIN_PASSWORD_LENGTH, RESET_TOKEN_EXPIRY_MS};

/// Outcome of an authentication operation. Every public operation reports
/// through this shape; none of them panic or return a raw error.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

impl AuthResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Orchestrates registration, login/logout, and the password-reset flow
/// over the credential store, the reset-token store, and the session cell.
/// The service is the only writer of those records.
pub struct AuthService {
    credentials: CredentialStore,
    tokens: ResetTokenStore,
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
}

impl AuthService {
    pub fn new(backend: Arc<dyn StorageBackend>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            credentials: CredentialStore::new(backend.clone()),
            tokens: ResetTokenStore::new(backend.clone()),
            session: Arc::new(SessionState::new(backend)),
            navigator,
        }
    }

    /// The reactive session cell, for consumers that want to observe
    /// login/logout changes.
    pub fn session(&self) -> Arc<SessionState> {
        self.session.clone()
    }

    /// Create a new account. Validation failures and duplicate emails come
    /// back as failed responses; a successful registration does not log the
    /// user in.
    pub fn register(&self, candidate: User) -> AuthResponse {
        if let Err(violation) =
            validate_registration(&candidate.name, &candidate.email, &candidate.password)
        {
            return AuthResponse::fail(violation.message());
        }

        let mut users = self.credentials.list_users();
        let email = normalize_email(&candidate.email);

        let exists = users.iter().any(|u| normalize_email(&u.email) == email);
        if exists {
            log_auth_event("register", &email, false, Some("duplicate email"));
            return AuthResponse::fail("Email is already registered.");
        }

        users.push(User {
            name: candidate.name.trim().to_string(),
            email,
            password: candidate.password,
        });
        self.credentials.save_users(&users);

        log_auth_event("register", &candidate.email, true, None);
        AuthResponse::ok("Registration successful. You can now log in.")
    }

    /// Sign in with email and password. The failure message never reveals
    /// which of the two was wrong.
    pub fn login(&self, email: &str, password: &str) -> AuthResponse {
        if email.is_empty() || password.is_empty() {
            return AuthResponse::fail("Email and password are required.");
        }

        let normalized = normalize_email(email);
        let found = self
            .credentials
            .list_users()
            .into_iter()
            .find(|u| normalize_email(&u.email) == normalized && u.password == password);

        match found {
            Some(user) => {
                self.session.set(user.clone());
                log_auth_event("login", &normalized, true, None);
                AuthResponse::ok(format!("Welcome back, {}!", user.name))
            }
            None => {
                log_auth_event("login", &normalized, false, Some("no matching credentials"));
                AuthResponse::fail("Invalid email or password.")
            }
        }
    }

    /// End the current session. With `redirect`, the navigator is pointed
    /// back at the login view; programmatic callers pass `false` to skip
    /// that side effect. Safe to call when nobody is signed in.
    pub fn logout(&self, redirect: bool) {
        self.session.clear();
        log_auth_event("logout", "-", true, None);
        if redirect {
            self.navigator.navigate_to("/login");
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.current().is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current()
    }

    /// Issue a reset token for a registered email, valid for 15 minutes.
    /// A new request supersedes any outstanding token for the same email.
    ///
    /// The unknown-email failure message reveals whether an address is
    /// registered. That disclosure is inherited observable behavior; see
    /// DESIGN.md before changing it.
    pub fn forgot_password(&self, email: &str) -> AuthResponse {
        if email.trim().is_empty() {
            return AuthResponse::fail("Email is required.");
        }
        if !is_valid_email(email) {
            return AuthResponse::fail("Email format is invalid.");
        }

        let normalized = normalize_email(email);
        let registered = self
            .credentials
            .list_users()
            .iter()
            .any(|u| normalize_email(&u.email) == normalized);
        if !registered {
            log_auth_event("forgot_password", &normalized, false, Some("unknown email"));
            return AuthResponse::fail("Email is not registered.");
        }

        let record = PasswordResetRecord {
            email: normalized.clone(),
            token: generate_reset_token(),
            expires_at: current_timestamp_millis() + RESET_TOKEN_EXPIRY_MS,
        };
        self.tokens.save(record);

        log_auth_event("forgot_password", &normalized, true, None);
        AuthResponse::ok(format!(
            "A password reset link has been sent to {}. The token is valid for 15 minutes.",
            email
        ))
    }

    /// Complete a password reset. An absent (email, token) pair and an
    /// expired record fail with distinct messages; expiry also consumes
    /// the record so the same token cannot be retried.
    pub fn reset_password(&self, email: &str, new_password: &str, token: &str) -> AuthResponse {
        if email.is_empty() || new_password.is_empty() || token.is_empty() {
            return AuthResponse::fail("Email, new password, and token are required.");
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return AuthResponse::fail("Password must be at least 6 characters.");
        }

        let normalized = normalize_email(email);
        let record = match self.tokens.find(&normalized, token) {
            Some(record) => record,
            None => {
                log_auth_event("reset_password", &normalized, false, Some("unknown token"));
                return AuthResponse::fail("Reset token is invalid or has expired.");
            }
        };

        if current_timestamp_millis() > record.expires_at {
            self.tokens.clear(&normalized);
            log_auth_event("reset_password", &normalized, false, Some("token expired"));
            return AuthResponse::fail("Reset token has expired. Please request a new one.");
        }

        let mut users = self.credentials.list_users();
        let user = match users
            .iter_mut()
            .find(|u| normalize_email(&u.email) == normalized)
        {
            Some(user) => user,
            // Reachable only if the store was mutated behind our back
            None => {
                log_auth_event("reset_password", &normalized, false, Some("user missing"));
                return AuthResponse::fail("User not found.");
            }
        };

        user.password = new_password.to_string();
        self.credentials.save_users(&users);
        self.tokens.clear(&normalized);

        log_auth_event("reset_password", &normalized, true, None);
        AuthResponse::ok("Password has been reset. You can now log in.")
    }
}
