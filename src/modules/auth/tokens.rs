use std::sync::Arc;

use log::{error, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::modules::storage::StorageBackend;
use crate::RESET_TOKENS_KEY;

/// An outstanding password-reset request for one account.
///
/// `expires_at` is epoch milliseconds; the record is only honored while the
/// wall clock is at or before it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PasswordResetRecord {
    pub email: String,
    pub token: String,
    pub expires_at: u64,
}

/// Generate an opaque reset token. Collision probability is not formally
/// bounded, matching the scope of a single-tenant local store.
pub fn generate_reset_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}

/// Keyed store of outstanding reset tokens, at most one live record per
/// email. Callers pass emails already normalized (trimmed, lowercased).
pub struct ResetTokenStore {
    backend: Arc<dyn StorageBackend>,
}

impl ResetTokenStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn read_all(&self) -> Vec<PasswordResetRecord> {
        let raw = match self.backend.get(RESET_TOKENS_KEY) {
            Some(raw) => raw,
            None => return Vec::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Stored reset tokens are unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn write_all(&self, records: &[PasswordResetRecord]) {
        match serde_json::to_string(records) {
            Ok(data) => self.backend.set(RESET_TOKENS_KEY, &data),
            Err(e) => error!("Failed to serialize reset tokens: {}", e),
        }
    }

    /// Store a reset record, superseding any prior record for the same email.
    pub fn save(&self, record: PasswordResetRecord) {
        let mut records = self.read_all();
        records.retain(|r| r.email != record.email);
        records.push(record);
        self.write_all(&records);
    }

    /// Look up the record matching both email and token.
    pub fn find(&self, email: &str, token: &str) -> Option<PasswordResetRecord> {
        self.read_all()
            .into_iter()
            .find(|r| r.email == email && r.token == token)
    }

    /// Drop the record for `email`, if one exists.
    pub fn clear(&self, email: &str) {
        let mut records = self.read_all();
        records.retain(|r| r.email != email);
        self.write_all(&records);
    }
}
