//! Calendar event entity: domain shape, identifier, and draft type.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default event duration when the caller does not provide one.
pub const DEFAULT_EVENT_DURATION: &str = "1h";

/// Unique identifier for a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new time-ordered event identifier (UUID v7).
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

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A calendar event as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Unique identifier, assigned by the backend on insert.
    pub id: EventId,
    /// Short human-readable title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Time of day, always second-precision (`HH:MM:SS` on the wire).
    pub time: NaiveTime,
    /// Free-form duration string, e.g. `"1h"` or `"30m"`.
    pub duration: String,
}

/// Caller-supplied fields for creating a calendar event.
#[derive(Debug, Clone)]
pub struct EventDraft {
    /// Title for the new event.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Time of day as entered, `HH:MM` or `HH:MM:SS`.
    pub time: String,
    /// Duration; defaults to [`DEFAULT_EVENT_DURATION`].
    pub duration: Option<String>,
}
