use std::sync::Arc;

use log::warn;
use rand::Rng;

use super::model::Note;
use crate::modules::storage::StorageBackend;
use crate::modules::utils::logging::log_data_operation;
use crate::NOTES_KEY;

const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_LENGTH: usize = 7;

/// Generate a short opaque note id
pub fn generate_note_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect()
}

/// Persisted collection of daily notes, newest first.
pub struct NoteStore {
    backend: Arc<dyn StorageBackend>,
}

impl NoteStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// All notes, newest first. Missing or unreadable data reads as empty.
    pub fn notes(&self) -> Vec<Note> {
        let raw = match self.backend.get(NOTES_KEY) {
            Some(raw) => raw,
            None => return Vec::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(notes) => notes,
            Err(e) => {
                warn!("Stored notes are unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the whole collection.
    pub fn set_notes(&self, notes: &[Note]) {
        match serde_json::to_string(notes) {
            Ok(data) => {
                self.backend.set(NOTES_KEY, &data);
                log_data_operation("set_notes", NOTES_KEY, true, None);
            }
            Err(e) => {
                log_data_operation("set_notes", NOTES_KEY, false, Some(&e.to_string()));
            }
        }
    }

    /// Prepend a note so the most recent entry lists first.
    pub fn add(&self, note: Note) {
        let mut notes = self.notes();
        notes.insert(0, note);
        self.set_notes(&notes);
    }

    /// Replace the note with the same id. Unknown ids are ignored.
    pub fn update(&self, note: Note) {
        let mut notes = self.notes();
        if let Some(existing) = notes.iter_mut().find(|n| n.id == note.id) {
            *existing = note;
            self.set_notes(&notes);
        }
    }

    /// Remove the note with the given id, if present.
    pub fn delete(&self, id: &str) {
        let mut notes = self.notes();
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() != before {
            self.set_notes(&notes);
        }
    }

    /// How many notes fall in the given year and month.
    pub fn count_for_month(&self, year: i32, month: u32) -> usize {
        self.notes()
            .iter()
            .filter(|n| n.falls_in_month(year, month))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::MemoryBackend;

    fn setup_store() -> (NoteStore, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        (NoteStore::new(backend.clone()), backend)
    }

    fn note(id: &str, title: &str, date: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            time: None,
            location: Some("Starbucks".to_string()),
            description: "Planning session".to_string(),
            color: Some("#FF6F61".to_string()),
            created_at: "2022-01-10T08:00:00Z".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_empty_store_has_no_notes() {
        let (store, _) = setup_store();
        assert!(store.notes().is_empty());
    }

    #[test]
    fn test_add_prepends_newest_first() {
        let (store, _) = setup_store();

        store.add(note("n1", "First", "2022-01-10"));
        store.add(note("n2", "Second", "2022-01-11"));

        let notes = store.notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "n2");
        assert_eq!(notes[1].id, "n1");
    }

    #[test]
    fn test_update_replaces_matching_id() {
        let (store, _) = setup_store();
        store.add(note("n1", "Original", "2022-01-10"));

        let mut changed = note("n1", "Edited", "2022-01-10");
        changed.location = None;
        store.update(changed);

        let notes = store.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Edited");
        assert_eq!(notes[0].location, None);
    }

    #[test]
    fn test_update_unknown_id_is_ignored() {
        let (store, _) = setup_store();
        store.add(note("n1", "Original", "2022-01-10"));

        store.update(note("ghost", "Edited", "2022-01-10"));

        assert_eq!(store.notes()[0].title, "Original");
    }

    #[test]
    fn test_delete_by_id() {
        let (store, _) = setup_store();
        store.add(note("n1", "Keep", "2022-01-10"));
        store.add(note("n2", "Drop", "2022-01-11"));

        store.delete("n2");

        let notes = store.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "n1");

        // Deleting an unknown id changes nothing
        store.delete("ghost");
        assert_eq!(store.notes().len(), 1);
    }

    #[test]
    fn test_count_for_month() {
        let (store, _) = setup_store();
        store.add(note("n1", "Jan A", "2022-01-10"));
        store.add(note("n2", "Jan B", "2022-01-12"));
        store.add(note("n3", "Feb", "2022-02-01"));

        assert_eq!(store.count_for_month(2022, 1), 2);
        assert_eq!(store.count_for_month(2022, 2), 1);
        assert_eq!(store.count_for_month(2023, 1), 0);
    }

    #[test]
    fn test_corrupt_record_reads_as_empty() {
        let (store, backend) = setup_store();

        backend.set(NOTES_KEY, "not notes");
        assert!(store.notes().is_empty());
    }

    #[test]
    fn test_generated_ids_are_short_and_lowercase() {
        let id = generate_note_id();
        assert_eq!(id.len(), 7);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
