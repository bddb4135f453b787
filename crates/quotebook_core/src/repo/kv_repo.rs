//! Key/value repository contracts with SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide `get_item`/`set_item`/`remove_item` over string keys and values.
//! - `SqliteLocalStorage` is durable; `MemoryStorage` is process-local and
//!   doubles as session storage.
//!
//! # Invariants
//! - Keys are stored verbatim; no normalization is applied.
//! - `set_item` overwrites atomically via a single upsert.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Shared in-memory map was poisoned by a panicking writer.
    Poisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Poisoned => write!(f, "storage lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Browser-style string key/value storage.
pub trait KeyValueStorage: Send {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> RepoResult<()>;
    fn remove_item(&mut self, key: &str) -> RepoResult<()>;
}

/// Durable storage backed by the `local_storage` table.
pub struct SqliteLocalStorage {
    conn: Connection,
}

impl SqliteLocalStorage {
    /// Wraps a connection returned by `db::open_db` / `db::open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Gives back the underlying connection.
    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl KeyValueStorage for SqliteLocalStorage {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// In-memory storage. Clones share the same map, so a test can keep a handle
/// and inspect what a component wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        let items = self.items.lock().map_err(|_| RepoError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> RepoResult<()> {
        let mut items = self.items.lock().map_err(|_| RepoError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> RepoResult<()> {
        let mut items = self.items.lock().map_err(|_| RepoError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}
