//! SQLite record store
//!
//! Rows live in the `records` table created by the embedded migrations. Each
//! row carries a SHA-256 of its payload, verified on read.

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use super::{validate_key, RecordStore, StoreBackend};
use crate::db;
use crate::errors::{from_rusqlite, payload_corrupted, Result};
use crate::migrations::{apply_migrations, compute_checksum};

pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open a database file, configure it and bring its schema up to date
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_connection(db::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl RecordStore for SqliteRecordStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let conn = self.conn.lock();
        let row: Option<(String, String)> = conn
            .query_row(
                "SELECT payload_json, checksum FROM records WHERE record_key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(from_rusqlite)?;

        match row {
            Some((payload, expected)) => {
                let actual = compute_checksum(&payload);
                if actual != expected {
                    return Err(payload_corrupted(key, &expected, &actual));
                }
                Ok(Some(payload))
            }
            None => Ok(None),
        }
    }

    fn replace(&self, key: &str, payload: &str) -> Result<()> {
        validate_key(key)?;
        let checksum = compute_checksum(payload);
        let now = chrono::Utc::now().timestamp();
        self.conn
            .lock()
            .execute(
                "INSERT INTO records (record_key, payload_json, checksum, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(record_key) DO UPDATE SET
                    payload_json = excluded.payload_json,
                    checksum = excluded.checksum,
                    updated_at = excluded.updated_at",
                rusqlite::params![key, payload, checksum, now],
            )
            .map_err(from_rusqlite)?;
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }
}
