//! Local cache of characters and events.
//!
//! SQLite-backed, schema created on open, rows persist across app runs.
//! Every batch save runs inside one transaction so a crash mid-page never
//! leaves a partially persisted page behind: commit is explicit, and a
//! transaction dropped without commit rolls back.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::protocol::{CharacterRecord, EventRecord};

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A query or creation could not resolve to the expected entity.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// SQLite-backed local store for characters and their events.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open or create a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a store in the user data directory.
    pub fn open_default(app_name: &str) -> Result<Self, StoreError> {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf()))
            .join(app_name);

        std::fs::create_dir_all(&data_dir)?;
        Self::open(data_dir.join("cache.db"))
    }

    /// Open an in-memory store, handy for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS characters (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                image_url TEXT NOT NULL,
                bio TEXT NOT NULL,
                fetched_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                image_url TEXT NOT NULL,
                description TEXT NOT NULL,
                fetched_at INTEGER NOT NULL
            )",
            [],
        )?;

        // Many-to-many: an event spans characters, a character spans events.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS character_events (
                character_id INTEGER NOT NULL,
                event_id INTEGER NOT NULL,
                PRIMARY KEY (character_id, event_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_characters_name ON characters(name)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_character_events_character
             ON character_events(character_id)",
            [],
        )?;

        Ok(())
    }

    // === Characters ===

    /// All cached characters, ordered by name.
    pub fn characters(&self) -> Result<Vec<CharacterRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, image_url, bio FROM characters ORDER BY name, id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(CharacterRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                image_url: row.get(2)?,
                bio: row.get(3)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn character_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM characters", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Persist one fetched batch of characters in a single transaction.
    ///
    /// `id` is the natural key; refetching the same character upserts the
    /// existing row instead of duplicating it.
    pub fn save_characters(&mut self, records: &[CharacterRecord]) -> Result<usize, StoreError> {
        let now = chrono::Utc::now().timestamp_millis();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO characters (id, name, image_url, bio, fetched_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 image_url = excluded.image_url,
                 bio = excluded.bio,
                 fetched_at = excluded.fetched_at",
            )?;
            for record in records {
                stmt.execute(params![record.id, record.name, record.image_url, record.bio, now])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Remove a character and its event links.
    pub fn delete_character(&mut self, character_id: i64) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM character_events WHERE character_id = ?1",
            params![character_id],
        )?;
        tx.execute("DELETE FROM characters WHERE id = ?1", params![character_id])?;
        tx.commit()?;
        Ok(())
    }

    // === Events ===

    /// Events linked to the given character, in insertion order.
    pub fn events_for_character(&self, character_id: i64) -> Result<Vec<EventRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT e.name, e.image_url, e.description
             FROM events e
             JOIN character_events ce ON ce.event_id = e.id
             WHERE ce.character_id = ?1
             ORDER BY e.id",
        )?;

        let rows = stmt.query_map(params![character_id], |row| {
            Ok(EventRecord {
                name: row.get(0)?,
                image_url: row.get(1)?,
                description: row.get(2)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn event_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Persist one fetched batch of events for a character in a single
    /// transaction.
    ///
    /// Events upsert on name, so an event shared by several characters is
    /// stored once and linked to each of them.
    pub fn save_events(
        &mut self,
        character_id: i64,
        records: &[EventRecord],
    ) -> Result<usize, StoreError> {
        let now = chrono::Utc::now().timestamp_millis();
        let tx = self.conn.transaction()?;
        for record in records {
            tx.execute(
                "INSERT INTO events (name, image_url, description, fetched_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(name) DO UPDATE SET
                 image_url = excluded.image_url,
                 description = excluded.description,
                 fetched_at = excluded.fetched_at",
                params![record.name, record.image_url, record.description, now],
            )?;

            let event_id: Option<i64> = tx
                .query_row(
                    "SELECT id FROM events WHERE name = ?1",
                    params![record.name],
                    |row| row.get(0),
                )
                .optional()?;
            let event_id = event_id.ok_or_else(|| {
                StoreError::InvalidRecord(format!("event '{}' missing after upsert", record.name))
            })?;

            tx.execute(
                "INSERT OR IGNORE INTO character_events (character_id, event_id)
                 VALUES (?1, ?2)",
                params![character_id, event_id],
            )?;
        }
        tx.commit()?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn create_test_store() -> LocalStore {
        let temp_path = PathBuf::from(format!("/tmp/test_marvel_{}.db", uuid::Uuid::new_v4()));
        LocalStore::open(&temp_path).unwrap()
    }

    fn character(id: i64, name: &str) -> CharacterRecord {
        CharacterRecord {
            id,
            name: name.to_string(),
            image_url: format!("https://i.annihil.us/{}.jpg", id),
            bio: format!("{} bio", name),
        }
    }

    fn event(name: &str) -> EventRecord {
        EventRecord {
            name: name.to_string(),
            image_url: String::new(),
            description: format!("{} description", name),
        }
    }

    #[test]
    fn test_character_roundtrip_ordered_by_name() {
        let mut store = create_test_store();
        store
            .save_characters(&[character(3, "Wolverine"), character(1, "Hulk"), character(2, "Thor")])
            .unwrap();

        let names: Vec<String> = store.characters().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Hulk", "Thor", "Wolverine"]);
        assert_eq!(store.character_count().unwrap(), 3);
    }

    #[test]
    fn test_saving_same_id_twice_does_not_duplicate() {
        let mut store = create_test_store();
        store.save_characters(&[character(1, "Hulk")]).unwrap();
        store.save_characters(&[character(1, "Hulk (updated)")]).unwrap();

        let characters = store.characters().unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].name, "Hulk (updated)");
    }

    #[test]
    fn test_events_scoped_to_their_character() {
        let mut store = create_test_store();
        store
            .save_characters(&[character(1, "Hulk"), character(2, "Thor")])
            .unwrap();
        store
            .save_events(1, &[event("World War Hulk"), event("Civil War")])
            .unwrap();
        store.save_events(2, &[event("Ragnarok")]).unwrap();

        let hulk_events = store.events_for_character(1).unwrap();
        assert_eq!(hulk_events.len(), 2);
        assert_eq!(hulk_events[0].name, "World War Hulk");

        let thor_events = store.events_for_character(2).unwrap();
        assert_eq!(thor_events.len(), 1);
        assert_eq!(thor_events[0].name, "Ragnarok");

        assert!(store.events_for_character(99).unwrap().is_empty());
    }

    #[test]
    fn test_shared_event_stored_once_linked_twice() {
        let mut store = create_test_store();
        store.save_events(1, &[event("Civil War")]).unwrap();
        store.save_events(2, &[event("Civil War")]).unwrap();

        assert_eq!(store.event_count().unwrap(), 1);
        assert_eq!(store.events_for_character(1).unwrap().len(), 1);
        assert_eq!(store.events_for_character(2).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_character_removes_links() {
        let mut store = create_test_store();
        store.save_characters(&[character(1, "Hulk")]).unwrap();
        store.save_events(1, &[event("World War Hulk")]).unwrap();

        store.delete_character(1).unwrap();
        assert_eq!(store.character_count().unwrap(), 0);
        assert!(store.events_for_character(1).unwrap().is_empty());
    }

    #[test]
    fn test_records_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");

        {
            let mut store = LocalStore::open(&path).unwrap();
            store.save_characters(&[character(1, "Hulk")]).unwrap();
        }

        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.character_count().unwrap(), 1);
        assert_eq!(store.characters().unwrap()[0].name, "Hulk");
    }
}
