use std::cell::{Cell, RefCell};

use uuid::Uuid;

use crate::models::DogProfile;

use super::{ProfileStore, StoreError};

/// In-memory store used by the test suites in place of [`super::SqliteStore`].
/// Interior mutability keeps the [`ProfileStore`] trait's shared-reference
/// operations intact, and the write-failure switch lets tests drive the
/// screens through the commit-failed path without touching a database.
#[derive(Default)]
pub struct MemoryStore {
    profiles: RefCell<Vec<DogProfile>>,
    fail_writes: Cell<bool>,
    save_calls: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail with a commit error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of times `save` has been invoked, failed attempts included.
    /// Lets tests assert that validation errors never reach the store.
    pub fn save_calls(&self) -> usize {
        self.save_calls.get()
    }
}

impl ProfileStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<DogProfile>, StoreError> {
        Ok(self.profiles.borrow().clone())
    }

    fn save(
        &self,
        name: &str,
        owner: Option<&str>,
        summary: Option<&str>,
        photo: Option<&[u8]>,
    ) -> Result<DogProfile, StoreError> {
        self.save_calls.set(self.save_calls.get() + 1);

        if self.fail_writes.get() {
            return Err(StoreError::Commit("simulated write failure".to_string()));
        }

        let profile = DogProfile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            owner: owner.map(str::to_string),
            summary: summary.map(str::to_string),
            photo: photo.map(<[u8]>::to_vec),
        };
        self.profiles.borrow_mut().push(profile.clone());
        Ok(profile)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.profiles.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_fetch_returns_matching_record() {
        let store = MemoryStore::new();
        let saved = store
            .save("Dog1", Some("Owner1"), Some("Summary1"), None)
            .unwrap();

        let fetched = store.fetch_all().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, saved.id);
        assert_eq!(fetched[0].name, "Dog1");
        assert_eq!(fetched[0].owner.as_deref(), Some("Owner1"));
        assert_eq!(fetched[0].summary.as_deref(), Some("Summary1"));
    }

    #[test]
    fn each_save_issues_a_distinct_id() {
        let store = MemoryStore::new();
        let a = store.save("Twin", None, None, None).unwrap();
        let b = store.save("Twin", None, None, None).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn deleting_an_absent_id_is_a_no_op() {
        let store = MemoryStore::new();
        store.save("Rex", None, None, None).unwrap();
        store.delete("no-such-id").unwrap();
        assert_eq!(store.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn failed_writes_leave_the_collection_unchanged() {
        let store = MemoryStore::new();
        store.save("Rex", None, None, None).unwrap();

        store.fail_writes(true);
        let result = store.save("Ghost", None, None, None);
        assert!(matches!(result, Err(StoreError::Commit(_))));
        assert_eq!(store.fetch_all().unwrap().len(), 1);
        assert_eq!(store.save_calls(), 2);

        store.fail_writes(false);
        store.save("Milo", None, None, None).unwrap();
        assert_eq!(store.fetch_all().unwrap().len(), 2);
    }
}
