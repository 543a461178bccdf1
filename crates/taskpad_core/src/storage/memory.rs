//! In-memory storage backend.
//!
//! # Responsibility
//! - Provide the storage fake used by tests and smoke probes.
//!
//! # Invariants
//! - Never fails; the blob lives for the lifetime of the backend value.

use std::sync::{Mutex, PoisonError};

use super::{StorageBackend, StorageResult};

/// Volatile backend holding the blob behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> StorageResult<Option<Vec<u8>>> {
        // Poison recovery: the blob is replaced wholesale on save, so a
        // panicked writer cannot leave it half-written.
        let blob = self.blob.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(blob.clone())
    }

    fn save(&self, bytes: &[u8]) -> StorageResult<()> {
        let mut blob = self.blob.lock().unwrap_or_else(PoisonError::into_inner);
        *blob = Some(bytes.to_vec());
        Ok(())
    }
}
