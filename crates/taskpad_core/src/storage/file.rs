//! Flat-file storage backend.
//!
//! # Responsibility
//! - Persist the blob as one file under a caller-provided directory.
//!
//! # Invariants
//! - The file name is fixed; one directory holds one task collection.
//! - An absent file reads as "nothing stored yet", not as an error.

use std::path::{Path, PathBuf};

use log::error;

use super::{StorageBackend, StorageResult};

const STORAGE_FILE_NAME: &str = "tasks.json";

/// Backend writing the whole blob to `<dir>/tasks.json`.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Creates the backend, creating `dir` if it does not exist yet.
    pub fn new(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(STORAGE_FILE_NAME),
        })
    }

    /// Full path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn load(&self) -> StorageResult<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read(&self.path)?))
    }

    fn save(&self, bytes: &[u8]) -> StorageResult<()> {
        std::fs::write(&self.path, bytes).map_err(|err| {
            error!(
                "event=storage_save module=storage backend=file status=error path={} error={err}",
                self.path.display()
            );
            err.into()
        })
    }
}
