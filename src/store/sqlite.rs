use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::models::DogProfile;

use super::{ProfileStore, StoreError};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".dog-profile-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "profiles.sqlite";

/// SQLite-backed profile store. A single `dogs` table holds every record;
/// the schema is created lazily when the store is opened.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Ensure the database file exists inside the user's home directory and
    /// return a store over it. A home directory that cannot be located or a
    /// database that cannot be opened fails here, at startup, so the caller
    /// never ends up holding a store whose operations can never complete.
    pub fn open() -> Result<Self, StoreError> {
        let db_path = db_path()?;

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Self::with_connection(conn)
    }

    /// Build a store over an existing connection and run the lazy schema
    /// migration. Tests pass `Connection::open_in_memory()` here.
    pub fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS dogs (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                owner TEXT,
                summary TEXT,
                photo BLOB
            )",
            [],
        )
        .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        Ok(Self { conn })
    }
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf, StoreError> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| StoreError::Unavailable("could not locate home directory".to_string()))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

impl ProfileStore for SqliteStore {
    /// Load every saved profile. No ORDER BY: callers sort their own
    /// snapshots.
    fn fetch_all(&self) -> Result<Vec<DogProfile>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, owner, summary, photo FROM dogs")
            .map_err(|err| StoreError::Fetch(err.to_string()))?;

        let profiles = stmt
            .query_map([], |row| {
                Ok(DogProfile {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    owner: row.get(2)?,
                    summary: row.get(3)?,
                    photo: row.get(4)?,
                })
            })
            .map_err(|err| StoreError::Fetch(err.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| StoreError::Fetch(err.to_string()))?;

        Ok(profiles)
    }

    /// Insert a new row under a freshly generated identifier. We echo the
    /// hydrated struct so callers can update UI state without re-querying.
    /// The single INSERT is atomic, so a rejected write leaves no partial
    /// record behind for later fetches.
    fn save(
        &self,
        name: &str,
        owner: Option<&str>,
        summary: Option<&str>,
        photo: Option<&[u8]>,
    ) -> Result<DogProfile, StoreError> {
        let profile = DogProfile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            owner: owner.map(str::to_string),
            summary: summary.map(str::to_string),
            photo: photo.map(<[u8]>::to_vec),
        };

        self.conn
            .execute(
                "INSERT INTO dogs (id, name, owner, summary, photo)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    profile.id,
                    profile.name,
                    profile.owner,
                    profile.summary,
                    profile.photo
                ],
            )
            .map_err(|err| StoreError::Commit(err.to_string()))?;

        Ok(profile)
    }

    /// Remove a row by identifier. The affected-row count is deliberately not
    /// checked: deleting an id that was never saved is a no-op.
    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM dogs WHERE id = ?1", params![id])
            .map_err(|err| StoreError::Commit(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        let conn = Connection::open_in_memory().expect("in-memory database");
        SqliteStore::with_connection(conn).expect("schema")
    }

    #[test]
    fn save_then_fetch_returns_matching_record() {
        let store = store();
        let saved = store
            .save("Rex", Some("Sam"), Some("A very good boy."), None)
            .unwrap();

        let fetched = store.fetch_all().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, saved.id);
        assert_eq!(fetched[0].name, "Rex");
        assert_eq!(fetched[0].owner.as_deref(), Some("Sam"));
        assert_eq!(fetched[0].summary.as_deref(), Some("A very good boy."));
        assert!(fetched[0].photo.is_none());
    }

    #[test]
    fn optional_fields_round_trip_as_null() {
        let store = store();
        store.save("Rex", None, None, None).unwrap();

        let fetched = store.fetch_all().unwrap();
        assert!(fetched[0].owner.is_none());
        assert!(fetched[0].summary.is_none());
    }

    #[test]
    fn photo_blob_round_trips() {
        let store = store();
        let bytes = vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a];
        let saved = store.save("Rex", None, None, Some(&bytes)).unwrap();
        assert_eq!(saved.photo.as_deref(), Some(bytes.as_slice()));

        let fetched = store.fetch_all().unwrap();
        assert_eq!(fetched[0].photo.as_deref(), Some(bytes.as_slice()));
    }

    #[test]
    fn each_save_issues_a_distinct_id() {
        let store = store();
        let a = store.save("Twin", None, None, None).unwrap();
        let b = store.save("Twin", None, None, None).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.fetch_all().unwrap().len(), 2);
    }

    #[test]
    fn delete_removes_only_the_matching_id() {
        let store = store();
        let keep = store.save("Keep", None, None, None).unwrap();
        let drop = store.save("Drop", None, None, None).unwrap();

        store.delete(&drop.id).unwrap();

        let fetched = store.fetch_all().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, keep.id);
    }

    #[test]
    fn deleting_an_absent_id_is_a_no_op() {
        let store = store();
        store.save("Rex", None, None, None).unwrap();

        store.delete("no-such-id").unwrap();

        assert_eq!(store.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn save_and_delete_scenario() {
        let store = store();
        let dog1 = store
            .save("Dog1", Some("Owner1"), Some("Summary1"), None)
            .unwrap();

        let fetched = store.fetch_all().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].name, "Dog1");

        store.save("Dog2", None, None, None).unwrap();
        store.save("Dog3", None, None, None).unwrap();
        assert_eq!(store.fetch_all().unwrap().len(), 3);

        store.delete(&dog1.id).unwrap();
        let remaining = store.fetch_all().unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|p| p.name != "Dog1"));
    }
}
