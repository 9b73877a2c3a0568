//! Persistence module split across logical submodules. All other components
//! reach the saved profiles exclusively through the [`ProfileStore`] trait;
//! the concrete backend is chosen once at startup and injected.

mod error;
mod memory;
mod sqlite;

use std::rc::Rc;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::models::DogProfile;

/// Capability contract for the profile store: fetch, save, delete. Keeping
/// this a trait (rather than a process-wide shared handle) lets tests drive
/// the screens against [`MemoryStore`] and keeps the backend swappable.
pub trait ProfileStore {
    /// Retrieve every persisted profile. Ordering is unspecified; sorting is
    /// the caller's responsibility.
    fn fetch_all(&self) -> Result<Vec<DogProfile>, StoreError>;

    /// Persist a new profile under a freshly generated unique identifier and
    /// return the persisted instance. A rejected write returns `Err` and
    /// leaves the collection untouched.
    fn save(
        &self,
        name: &str,
        owner: Option<&str>,
        summary: Option<&str>,
        photo: Option<&[u8]>,
    ) -> Result<DogProfile, StoreError>;

    /// Remove the profile with the given identifier from the persistent
    /// collection. Unknown identifiers are a no-op at this boundary; callers
    /// keep their own snapshots consistent by dropping the same id.
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Shared handles forward to the underlying store, so a single instance can
/// be constructed at startup and handed to every component that needs it.
impl<S: ProfileStore + ?Sized> ProfileStore for Rc<S> {
    fn fetch_all(&self) -> Result<Vec<DogProfile>, StoreError> {
        (**self).fetch_all()
    }

    fn save(
        &self,
        name: &str,
        owner: Option<&str>,
        summary: Option<&str>,
        photo: Option<&[u8]>,
    ) -> Result<DogProfile, StoreError> {
        (**self).save(name, owner, summary, photo)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}
