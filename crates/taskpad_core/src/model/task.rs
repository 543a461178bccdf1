//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the store.
//! - Provide creation-boundary validation and the overdue predicate.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `name` is never empty once a task passed validation.
//! - `created_at` never changes after creation.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every task in the collection.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation failures raised at the task creation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task name is empty or whitespace-only.
    EmptyName,
    /// Caller-provided ID is the nil UUID.
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be empty"),
            Self::NilId => write!(f, "task id must not be the nil uuid"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// The serialized shape matches the persisted layout consumed by callers:
/// `{id, name, dueDate, completed, createdAt}` with RFC 3339 date text and
/// `dueDate: null` when no due date is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID, assigned once at creation.
    pub id: TaskId,
    /// Non-empty user-facing label. Immutable after creation.
    pub name: String,
    /// Optional due instant. Absent values decode to `None`, never an error.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Completion flag. The only two-valued state a task carries.
    pub completed: bool,
    /// Creation instant. Immutable after creation.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a generated stable ID and `created_at = now`.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyName` when `name` trims to nothing.
    pub fn new(
        name: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), name, due_date, Utc::now())
    }

    /// Creates a task with caller-provided identity fields.
    ///
    /// Used by decode/test paths where identity already exists externally.
    ///
    /// # Errors
    /// - `TaskValidationError::NilId` when `id` is the nil UUID.
    /// - `TaskValidationError::EmptyName` when `name` trims to nothing.
    pub fn with_id(
        id: TaskId,
        name: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            name: name.into(),
            due_date,
            completed: false,
            created_at,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks the record-level invariants.
    ///
    /// Write paths must call this before persisting; read paths use it to
    /// reject invalid persisted state instead of masking it.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        Ok(())
    }

    /// Returns whether this task counts as overdue on the given calendar day.
    ///
    /// Overdue means: a due date is set, the task is not completed, and the
    /// due date falls on a local calendar day strictly before `today`.
    /// Time-of-day is ignored, so a task due today is never overdue.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) if !self.completed => due.with_timezone(&Local).date_naive() < today,
            _ => false,
        }
    }
}

/// Renders a due date for list views: `"Mar 5, 2026"`, or `"No due date"`.
pub fn format_due_date(due_date: Option<&DateTime<Utc>>) -> String {
    match due_date {
        Some(due) => due.with_timezone(&Local).format("%b %-d, %Y").to_string(),
        None => "No due date".to_string(),
    }
}
