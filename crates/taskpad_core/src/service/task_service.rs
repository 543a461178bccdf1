//! Task use-case service.
//!
//! # Responsibility
//! - Provide CRUD and the overdue sweep over the task store.
//! - Serialize every load-modify-save cycle through one mutex.
//!
//! # Invariants
//! - No in-memory mutation is durable until the store's `save` returned.
//! - A failed operation leaves the stored collection unchanged.
//! - `name`, `id` and `created_at` are immutable after creation; only
//!   `completed` and `due_date` accept updates.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, Utc};
use log::info;

use crate::model::task::{Task, TaskId};
use crate::storage::StorageBackend;
use crate::store::task_store::{StoreError, StoreResult, TaskStore};

/// Field changes accepted by [`TaskService::update`].
///
/// # Contract
/// - Outer `None` leaves the field untouched.
/// - `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub completed: Option<bool>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Use-case service wrapper for task CRUD and the overdue sweep.
pub struct TaskService<B: StorageBackend> {
    store: Mutex<TaskStore<B>>,
}

impl<B: StorageBackend> TaskService<B> {
    /// Creates a service owning the provided store.
    pub fn new(store: TaskStore<B>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    // Poison recovery: a cycle only persists at its very end, so the store
    // behind a panicked lock holder is still consistent.
    fn store(&self) -> MutexGuard<'_, TaskStore<B>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a task and appends it to the stored collection.
    ///
    /// # Contract
    /// - Validates `name` before touching storage.
    /// - Assigns a fresh ID and `created_at = now`, `completed = false`.
    /// - Returns the created task snapshot.
    pub fn create(
        &self,
        name: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> StoreResult<Task> {
        let task = Task::new(name, due_date)?;

        let store = self.store();
        let mut tasks = store.load()?;
        tasks.push(task.clone());
        store.save(&tasks)?;

        Ok(task)
    }

    /// Returns a snapshot of the full collection in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Task>> {
        self.store().load()
    }

    /// Applies `patch` to the task with the given ID.
    ///
    /// Returns `NotFound` when no task matches; storage is untouched then.
    pub fn update(&self, id: TaskId, patch: TaskPatch) -> StoreResult<Task> {
        let store = self.store();
        let mut tasks = store.load()?;

        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        let updated = task.clone();

        store.save(&tasks)?;
        Ok(updated)
    }

    /// Sets only the completion flag. Convenience wrapper over [`update`].
    ///
    /// [`update`]: TaskService::update
    pub fn set_completed(&self, id: TaskId, completed: bool) -> StoreResult<Task> {
        self.update(
            id,
            TaskPatch {
                completed: Some(completed),
                ..TaskPatch::default()
            },
        )
    }

    /// Removes the task with the given ID from the collection.
    ///
    /// Returns `NotFound` when no task matches, detected by comparing the
    /// collection length before and after filtering; storage is untouched
    /// then.
    pub fn delete(&self, id: TaskId) -> StoreResult<()> {
        let store = self.store();
        let tasks = store.load()?;

        let before = tasks.len();
        let remaining: Vec<Task> = tasks.into_iter().filter(|task| task.id != id).collect();
        if remaining.len() == before {
            return Err(StoreError::NotFound(id));
        }

        store.save(&remaining)
    }

    /// Marks every overdue, incomplete task as completed.
    ///
    /// # Contract
    /// - Overdue means a due date on a local calendar day strictly before
    ///   today; a task due today is never swept.
    /// - Tasks without a due date are never swept.
    /// - Sweep never uncompletes a task.
    /// - Persists only when at least one task changed.
    /// - Returns the number of tasks changed.
    pub fn sweep_overdue(&self) -> StoreResult<usize> {
        let store = self.store();
        let mut tasks = store.load()?;

        // One boundary per invocation; a sweep cannot straddle midnight.
        let today = Local::now().date_naive();

        let mut swept = 0usize;
        for task in &mut tasks {
            if task.is_overdue_on(today) {
                task.completed = true;
                swept += 1;
            }
        }

        if swept > 0 {
            store.save(&tasks)?;
            info!("event=sweep_overdue module=service status=ok swept={swept}");
        }

        Ok(swept)
    }
}
