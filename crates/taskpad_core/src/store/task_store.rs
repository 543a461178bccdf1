//! Task store: whole-collection load/save over a storage backend.
//!
//! # Responsibility
//! - Own the serialized form of the task collection.
//! - Convert backend bytes into validated `Task` records and back.
//!
//! # Invariants
//! - `save` replaces the entire blob; there is no partial write path.
//! - `load` never invents records: an empty backend yields an empty
//!   collection, malformed bytes yield `InvalidData`.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::storage::{StorageBackend, StorageError};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store and service level error for task persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(TaskValidationError),
    Storage(StorageError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Whole-collection store over an injected storage backend.
pub struct TaskStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> TaskStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Loads the full task collection in insertion order.
    ///
    /// # Contract
    /// - Returns an empty collection when nothing was stored yet.
    /// - Rejects malformed blobs with `InvalidData` and records that fail
    ///   validation with `Validation`.
    pub fn load(&self) -> StoreResult<Vec<Task>> {
        let Some(bytes) = self.backend.load()? else {
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = serde_json::from_slice(&bytes)
            .map_err(|err| StoreError::InvalidData(format!("malformed task collection: {err}")))?;

        for task in &tasks {
            task.validate()?;
        }

        Ok(tasks)
    }

    /// Serializes and persists the given collection as a full replace.
    pub fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        for task in tasks {
            task.validate()?;
        }

        let bytes = serde_json::to_vec(tasks)
            .map_err(|err| StoreError::InvalidData(format!("unencodable task collection: {err}")))?;

        self.backend.save(&bytes)?;
        Ok(())
    }
}
