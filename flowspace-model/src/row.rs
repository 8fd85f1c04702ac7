//! Wire-row shapes exchanged with the backend.
//!
//! Rows are snake_case JSON, matching the backend's column names
//! (`due_date`, `ai_suggestion`, `user_id`, `created_at`, ...). Optional
//! columns are nullable on the wire, so every optional field here is an
//! `Option` with a serde default; the mappers in [`crate::map`] apply the
//! domain-level defaults.
//!
//! Insert payloads (`New*Row`) carry the owner's `user_id` explicitly;
//! the backend assigns `id` (and `created_at` for notes) on insert.

use serde::{Deserialize, Serialize};

/// A task row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    /// Row identifier.
    pub id: String,
    /// Owning user's identifier.
    pub user_id: String,
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Task description, nullable.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority as a wire string (`low` / `medium` / `high`), nullable.
    #[serde(default)]
    pub priority: Option<String>,
    /// Status as a wire string (`todo` / `in-progress` / `completed`), nullable.
    #[serde(default)]
    pub status: Option<String>,
    /// Due date as an ISO date string (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: String,
    /// Assignee display name, nullable.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Tag list, nullable.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Completion flag, nullable.
    #[serde(default)]
    pub completed: Option<bool>,
    /// Assistant suggestion, nullable.
    #[serde(default)]
    pub ai_suggestion: Option<String>,
}

/// Insert payload for a new task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskRow {
    /// Owning user's identifier, attached explicitly by the writer.
    pub user_id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority wire string.
    pub priority: String,
    /// Status wire string.
    pub status: String,
    /// Due date as an ISO date string.
    pub due_date: String,
    /// Assignee display name.
    pub assignee: String,
    /// Tag list.
    pub tags: Vec<String>,
    /// Completion flag.
    pub completed: bool,
    /// Assistant suggestion; omitted from the payload when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestion: Option<String>,
}

/// Partial update payload for an existing task row.
///
/// Only fields that are `Some` are serialized, so the backend merges
/// exactly the provided columns and leaves the rest untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRowPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New priority wire string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// New status wire string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New due date ISO string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// New assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Replacement tag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// New assistant suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestion: Option<String>,
}

/// A calendar event row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    /// Row identifier.
    pub id: String,
    /// Owning user's identifier.
    pub user_id: String,
    /// Event title.
    #[serde(default)]
    pub title: String,
    /// Event description, nullable.
    #[serde(default)]
    pub description: Option<String>,
    /// Event date as an ISO date string.
    #[serde(default)]
    pub date: String,
    /// Time of day as `HH:MM:SS` (normalized on write).
    #[serde(default)]
    pub time: String,
    /// Free-form duration string, nullable.
    #[serde(default)]
    pub duration: Option<String>,
}

/// Insert payload for a new calendar event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEventRow {
    /// Owning user's identifier, attached explicitly by the writer.
    pub user_id: String,
    /// Event title.
    pub title: String,
    /// Event description; omitted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Event date as an ISO date string.
    pub date: String,
    /// Time of day, already normalized to `HH:MM:SS`.
    pub time: String,
    /// Free-form duration string.
    pub duration: String,
}

/// A note row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRow {
    /// Row identifier.
    pub id: String,
    /// Owning user's identifier.
    pub user_id: String,
    /// Note title.
    #[serde(default)]
    pub title: String,
    /// Note body.
    #[serde(default)]
    pub content: String,
    /// Tag list, nullable.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Creation timestamp as an RFC 3339 string, assigned by the backend.
    #[serde(default)]
    pub created_at: String,
}

/// Insert payload for a new note row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNoteRow {
    /// Owning user's identifier, attached explicitly by the writer.
    pub user_id: String,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Tag list.
    pub tags: Vec<String>,
}
