use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use log::{error, warn};

use super::credentials::User;
use crate::modules::storage::StorageBackend;
use crate::CURRENT_USER_KEY;

/// The single currently-authenticated user, held in memory and mirrored to
/// the persisted current-user record.
///
/// The cell is observable: `subscribe` hands out a channel that receives
/// the new value on every `set` and `clear`, so UI layers can react to
/// session changes without polling.
pub struct SessionState {
    backend: Arc<dyn StorageBackend>,
    current: Mutex<Option<User>>,
    watchers: Mutex<Vec<Sender<Option<User>>>>,
}

impl SessionState {
    /// Create the session cell, seeding it from the persisted record if one
    /// survives from an earlier run.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let current = Self::load_persisted(backend.as_ref());
        Self {
            backend,
            current: Mutex::new(current),
            watchers: Mutex::new(Vec::new()),
        }
    }

    fn load_persisted(backend: &dyn StorageBackend) -> Option<User> {
        let raw = backend.get(CURRENT_USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Persisted session record is unreadable, discarding: {}", e);
                None
            }
        }
    }

    /// The user currently signed in, if any.
    pub fn current(&self) -> Option<User> {
        self.current.lock().unwrap().clone()
    }

    /// Mark `user` as the active session and mirror it to storage.
    pub fn set(&self, user: User) {
        match serde_json::to_string(&user) {
            Ok(data) => self.backend.set(CURRENT_USER_KEY, &data),
            Err(e) => error!("Failed to serialize session record: {}", e),
        }
        *self.current.lock().unwrap() = Some(user.clone());
        self.notify(Some(user));
    }

    /// Drop the active session, both in memory and in storage. Clearing an
    /// already-empty session is a no-op apart from the notification.
    pub fn clear(&self) {
        self.backend.remove(CURRENT_USER_KEY);
        *self.current.lock().unwrap() = None;
        self.notify(None);
    }

    /// Observe session changes. Each call returns an independent receiver
    /// that gets the new value on every `set`/`clear` from then on.
    pub fn subscribe(&self) -> Receiver<Option<User>> {
        let (tx, rx) = mpsc::channel();
        self.watchers.lock().unwrap().push(tx);
        rx
    }

    fn notify(&self, value: Option<User>) {
        // Dropped receivers are pruned as they turn up
        self.watchers
            .lock()
            .unwrap()
            .retain(|watcher| watcher.send(value.clone()).is_ok());
    }
}
