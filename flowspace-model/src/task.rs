//! Task entity: domain shape, identifier, enums, draft and patch types.
//!
//! A task belongs to exactly one user. The `completed` flag is kept in
//! sync with `status` by caller convention; the model does not enforce it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task.
///
/// Opaque string on the wire; freshly generated identifiers are
/// time-ordered UUID v7 values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an identifier received from the backend.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (the default for new tasks).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Returns the wire-format string for this priority.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a wire-format priority string, if recognized.
    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started (the default for new tasks).
    #[default]
    Todo,
    /// Currently being worked on.
    InProgress,
    /// Finished.
    Completed,
}

impl TaskStatus {
    /// Returns the wire-format string for this status.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Parses a wire-format status string, if recognized.
    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A task as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier, assigned by the backend on insert.
    pub id: TaskId,
    /// Short human-readable title.
    pub title: String,
    /// Longer free-form description; empty when not provided.
    pub description: String,
    /// Priority level.
    pub priority: Priority,
    /// Workflow status.
    pub status: TaskStatus,
    /// Calendar date the task is due.
    pub due_date: NaiveDate,
    /// Display name of the person the task is assigned to.
    pub assignee: String,
    /// Ordered list of free-form tags.
    pub tags: Vec<String>,
    /// Completion flag, kept in sync with `status` by convention.
    pub completed: bool,
    /// Optional assistant-generated suggestion attached to the task.
    pub ai_suggestion: Option<String>,
}

/// Caller-supplied fields for creating a task.
///
/// Every field is optional; the store fills in defaults (due date today,
/// medium priority, todo status, empty tags) before inserting.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    /// Title for the new task.
    pub title: Option<String>,
    /// Description for the new task.
    pub description: Option<String>,
    /// Priority; defaults to [`Priority::Medium`].
    pub priority: Option<Priority>,
    /// Due date; defaults to the current date.
    pub due_date: Option<NaiveDate>,
    /// Tags; defaults to an empty list.
    pub tags: Option<Vec<String>>,
}

/// A partial update to an existing task.
///
/// Only fields that are `Some` are sent to the backend and merged into
/// the local copy; everything else keeps its prior value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New assignee.
    pub assignee: Option<String>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
    /// New completion flag.
    pub completed: Option<bool>,
    /// New assistant suggestion.
    pub ai_suggestion: Option<String>,
}

impl TaskPatch {
    /// Returns `true` if the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.assignee.is_none()
            && self.tags.is_none()
            && self.completed.is_none()
            && self.ai_suggestion.is_none()
    }
}
