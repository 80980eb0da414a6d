//! SQLite-backed preference store.

use std::ops::DerefMut;
use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use uuid::Uuid;

const GUEST_ID_KEY: &str = "guest_id";
const ONBOARDING_SEEN_KEY: &str = "onboarding_seen";
const LOGIN_SEEN_KEY: &str = "login_seen";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Key/value preference store. The connection sits behind a mutex so
/// the store can be shared across async tasks.
pub struct PreferenceStore {
    conn: Mutex<Connection>,
}

impl PreferenceStore {
    /// Opens (or creates) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, for tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.lock().execute_batch(
            "CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock();
        let value = conn
            .query_row("SELECT value FROM prefs WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.lock().execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Boolean flags are stored as `'1'` / `'0'`, matching the wire
    /// convention. Absent keys read as `false`.
    pub fn get_flag(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_string(key)?.as_deref() == Some("1"))
    }

    pub fn set_flag(&self, key: &str, on: bool) -> Result<(), StoreError> {
        self.set_string(key, if on { "1" } else { "0" })
    }

    /// The device's guest identity, minted on first read. The mint is
    /// a single transaction so two concurrent first reads agree on one
    /// id.
    pub fn get_or_create_guest_id(&self) -> Result<String, StoreError> {
        let mut guard = self.conn.lock();
        let tx = guard.deref_mut().transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO prefs (key, value) VALUES (?1, ?2)",
            params![GUEST_ID_KEY, Uuid::new_v4().to_string()],
        )?;
        let id: String = tx.query_row(
            "SELECT value FROM prefs WHERE key = ?1",
            params![GUEST_ID_KEY],
            |row| row.get(0),
        )?;
        tx.commit()?;
        Ok(id)
    }

    /// Replaces the current guest identity and returns the new one.
    pub fn reset_guest_id(&self) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.conn.lock().execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![GUEST_ID_KEY, id],
        )?;
        tracing::info!("Guest identity reset");
        Ok(id)
    }

    pub fn onboarding_seen(&self) -> Result<bool, StoreError> {
        self.get_flag(ONBOARDING_SEEN_KEY)
    }

    pub fn set_onboarding_seen(&self, seen: bool) -> Result<(), StoreError> {
        self.set_flag(ONBOARDING_SEEN_KEY, seen)
    }

    pub fn login_seen(&self) -> Result<bool, StoreError> {
        self.get_flag(LOGIN_SEEN_KEY)
    }

    pub fn set_login_seen(&self, seen: bool) -> Result<(), StoreError> {
        self.set_flag(LOGIN_SEEN_KEY, seen)
    }
}
