//! SQLite storage backend.
//!
//! # Responsibility
//! - Open file or in-memory SQLite databases for the key/value blob.
//! - Trigger schema migrations before returning a usable backend.
//!
//! # Invariants
//! - Returned backends have migrations fully applied.
//! - The blob lives in `kv_store` under the fixed storage key.

use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{error, info};
use rusqlite::{params, Connection};

use super::migrations::apply_migrations;
use super::{StorageBackend, StorageResult, STORAGE_KEY};

/// Backend storing the blob in a single `kv_store` row.
///
/// The connection is mutex-guarded so the backend can be shared behind the
/// service's own serialization point without further ceremony.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Opens a database file and applies all pending migrations.
    ///
    /// # Side effects
    /// - Emits `kv_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        Self::open_with("file", move || Connection::open(path))
    }

    /// Opens an in-memory database and applies all pending migrations.
    ///
    /// # Side effects
    /// - Emits `kv_open` logging events with duration and status.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    fn open_with(
        mode: &str,
        open: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StorageResult<Self> {
        let started_at = Instant::now();
        info!("event=kv_open module=storage status=start mode={mode}");

        let result = open()
            .map_err(Into::into)
            .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));

        match result {
            Ok(conn) => {
                info!(
                    "event=kv_open module=storage status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    conn: Mutex::new(conn),
                })
            }
            Err(err) => {
                error!(
                    "event=kv_open module=storage status=error mode={mode} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

impl StorageBackend for SqliteBackend {
    fn load(&self) -> StorageResult<Option<Vec<u8>>> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1;")?;
        let mut rows = stmt.query(params![STORAGE_KEY])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(row.get::<_, Vec<u8>>(0)?));
        }

        Ok(None)
    }

    fn save(&self, bytes: &[u8]) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![STORAGE_KEY, bytes],
        )?;
        Ok(())
    }
}
