//! Storage backends and the persistence seam they implement.
//!
//! # Responsibility
//! - Define the byte-level backend contract the task store writes through.
//! - Provide in-memory, flat-file and SQLite implementations.
//!
//! # Invariants
//! - A backend holds exactly one blob under the fixed storage key; every
//!   `save` is a full replace of that blob.
//! - `load` returns `None` only when nothing was ever stored.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;

mod file;
mod memory;
mod sqlite;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Fixed key under which the serialized task collection is stored.
pub const STORAGE_KEY: &str = "tasks";

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of the underlying storage medium.
///
/// Callers treat every variant as "storage unavailable": non-fatal, surfaced
/// synchronously, and leaving the stored collection unchanged.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage unavailable: {err}"),
            Self::Sqlite(err) => write!(f, "storage unavailable: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Byte-level persistence contract injected into the task store.
///
/// # Contract
/// - `load` returns the last saved blob, or `None` before the first save.
/// - `save` atomically replaces the whole blob at the granularity the
///   medium provides; there is no append path.
pub trait StorageBackend {
    fn load(&self) -> StorageResult<Option<Vec<u8>>>;
    fn save(&self, bytes: &[u8]) -> StorageResult<()>;
}
