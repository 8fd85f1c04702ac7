//! Note entity: domain shape, identifier, and draft type.
//!
//! Notes support only creation and listing; there is no update or delete
//! surface for them anywhere in the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a new time-ordered note identifier (UUID v7).
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

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A note as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Unique identifier, assigned by the backend on insert.
    pub id: NoteId,
    /// Short human-readable title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Ordered list of free-form tags.
    pub tags: Vec<String>,
    /// Creation timestamp, assigned by the backend.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a note.
///
/// Missing fields become empty strings / empty tag lists.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    /// Title for the new note.
    pub title: Option<String>,
    /// Note body.
    pub content: Option<String>,
    /// Tags; defaults to an empty list.
    pub tags: Option<Vec<String>>,
}
