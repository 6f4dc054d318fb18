use std::sync::Arc;

use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::modules::storage::StorageBackend;
use crate::USERS_KEY;

/// A registered account.
///
/// The email is the unique identity key; lookups normalize it (trim +
/// lowercase) before comparing. The password is stored as the user typed
/// it — plaintext comparison is part of the observable contract this app
/// inherited, not something this store hardens.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Reads and writes the registered-user list as a single persisted record.
///
/// The whole list is replaced on every write; there is no per-user update.
pub struct CredentialStore {
    backend: Arc<dyn StorageBackend>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Load every registered user. A missing or unreadable record comes
    /// back as an empty list so callers never see a storage error.
    pub fn list_users(&self) -> Vec<User> {
        let raw = match self.backend.get(USERS_KEY) {
            Some(raw) => raw,
            None => return Vec::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(users) => users,
            Err(e) => {
                warn!("Stored user list is unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the entire persisted user list.
    pub fn save_users(&self, users: &[User]) {
        match serde_json::to_string(users) {
            Ok(data) => self.backend.set(USERS_KEY, &data),
            Err(e) => error!("Failed to serialize user list: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::MemoryBackend;

    fn setup_store() -> (CredentialStore, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        (CredentialStore::new(backend.clone()), backend)
    }

    fn sample_user() -> User {
        User {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "secret123".to_string(),
        }
    }

    #[test]
    fn test_empty_store_lists_no_users() {
        let (store, _) = setup_store();
        assert!(store.list_users().is_empty());
    }

    #[test]
    fn test_save_and_list_roundtrip() {
        let (store, _) = setup_store();

        store.save_users(&[sample_user()]);

        let users = store.list_users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Test User");
        assert_eq!(users[0].email, "test@example.com");
        assert_eq!(users[0].password, "secret123");
    }

    #[test]
    fn test_save_replaces_entire_list() {
        let (store, _) = setup_store();

        store.save_users(&[sample_user()]);
        store.save_users(&[]);

        assert!(store.list_users().is_empty());
    }

    #[test]
    fn test_corrupt_record_reads_as_empty() {
        let (store, backend) = setup_store();

        backend.set(USERS_KEY, "{not json[");
        assert!(store.list_users().is_empty());

        // A wrong-shape but valid JSON document is treated the same way
        backend.set(USERS_KEY, "{\"users\": 3}");
        assert!(store.list_users().is_empty());
    }
}
