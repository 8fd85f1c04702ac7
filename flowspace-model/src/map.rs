//! Pure mapping between wire rows and domain shapes.
//!
//! All functions here are total and side-effect free: missing or
//! malformed optional columns fall back to the documented defaults
//! instead of failing, so a row that deserialized at all always maps to
//! a usable domain value. Mapping a row to its domain shape and back
//! preserves every column a fully-populated row carried.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::event::{DEFAULT_EVENT_DURATION, Event, EventDraft, EventId};
use crate::note::{Note, NoteDraft, NoteId};
use crate::row::{EventRow, NewEventRow, NewNoteRow, NewTaskRow, NoteRow, TaskRow, TaskRowPatch};
use crate::task::{Priority, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};

/// Default assignee for tasks created by the current user.
pub const DEFAULT_ASSIGNEE: &str = "You";

/// ISO date format used on the wire (`YYYY-MM-DD`).
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Second-precision time format used on the wire (`HH:MM:SS`).
const TIME_FORMAT: &str = "%H:%M:%S";

// ---------------------------------------------------------------------------
// Wire-string parsing helpers
// ---------------------------------------------------------------------------

/// Parses an ISO date string, falling back to the epoch date (1970-01-01)
/// when malformed or empty.
#[must_use]
pub fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap_or_default()
}

/// Parses a time-of-day string, accepting `HH:MM:SS` or `HH:MM`.
///
/// Falls back to midnight when malformed or empty. This is the
/// normalization step for user-entered event times: `"09:00"` and
/// `"09:00:00"` both map to the same [`NaiveTime`].
#[must_use]
pub fn normalize_time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .unwrap_or_default()
}

/// Formats a date for the wire.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a time-of-day for the wire, always second-precision.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parses an RFC 3339 timestamp, falling back to the Unix epoch.
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Row -> domain
// ---------------------------------------------------------------------------

/// Maps a task row to its domain shape, applying defaults for missing
/// optional columns: priority medium, status todo, empty description and
/// tags, assignee [`DEFAULT_ASSIGNEE`].
#[must_use]
pub fn task_from_row(row: TaskRow) -> Task {
    Task {
        id: TaskId::from_raw(row.id),
        title: row.title,
        description: row.description.unwrap_or_default(),
        priority: row
            .priority
            .as_deref()
            .and_then(Priority::from_wire)
            .unwrap_or_default(),
        status: row
            .status
            .as_deref()
            .and_then(TaskStatus::from_wire)
            .unwrap_or_default(),
        due_date: parse_date(&row.due_date),
        assignee: row
            .assignee
            .unwrap_or_else(|| DEFAULT_ASSIGNEE.to_string()),
        tags: row.tags.unwrap_or_default(),
        completed: row.completed.unwrap_or(false),
        ai_suggestion: row.ai_suggestion,
    }
}

/// Maps an event row to its domain shape, defaulting the duration to
/// [`DEFAULT_EVENT_DURATION`].
#[must_use]
pub fn event_from_row(row: EventRow) -> Event {
    Event {
        id: EventId::from_raw(row.id),
        title: row.title,
        description: row.description,
        date: parse_date(&row.date),
        time: normalize_time(&row.time),
        duration: row
            .duration
            .unwrap_or_else(|| DEFAULT_EVENT_DURATION.to_string()),
    }
}

/// Maps a note row to its domain shape, defaulting tags to empty.
#[must_use]
pub fn note_from_row(row: NoteRow) -> Note {
    Note {
        id: NoteId::from_raw(row.id),
        title: row.title,
        content: row.content,
        tags: row.tags.unwrap_or_default(),
        created_at: parse_timestamp(&row.created_at),
    }
}

// ---------------------------------------------------------------------------
// Domain -> row
// ---------------------------------------------------------------------------

/// Maps a task back to its row shape for the given owner.
#[must_use]
pub fn task_to_row(task: &Task, user_id: &str) -> TaskRow {
    TaskRow {
        id: task.id.as_str().to_string(),
        user_id: user_id.to_string(),
        title: task.title.clone(),
        description: Some(task.description.clone()),
        priority: Some(task.priority.as_wire().to_string()),
        status: Some(task.status.as_wire().to_string()),
        due_date: format_date(task.due_date),
        assignee: Some(task.assignee.clone()),
        tags: Some(task.tags.clone()),
        completed: Some(task.completed),
        ai_suggestion: task.ai_suggestion.clone(),
    }
}

/// Maps an event back to its row shape for the given owner.
#[must_use]
pub fn event_to_row(event: &Event, user_id: &str) -> EventRow {
    EventRow {
        id: event.id.as_str().to_string(),
        user_id: user_id.to_string(),
        title: event.title.clone(),
        description: event.description.clone(),
        date: format_date(event.date),
        time: format_time(event.time),
        duration: Some(event.duration.clone()),
    }
}

/// Maps a note back to its row shape for the given owner.
#[must_use]
pub fn note_to_row(note: &Note, user_id: &str) -> NoteRow {
    NoteRow {
        id: note.id.as_str().to_string(),
        user_id: user_id.to_string(),
        title: note.title.clone(),
        content: note.content.clone(),
        tags: Some(note.tags.clone()),
        created_at: note.created_at.to_rfc3339(),
    }
}

// ---------------------------------------------------------------------------
// Draft -> insert payload
// ---------------------------------------------------------------------------

/// Builds a task insert payload from a draft.
///
/// Defaults: due date `today`, priority medium, status todo, completed
/// false, empty tags and description, assignee [`DEFAULT_ASSIGNEE`].
#[must_use]
pub fn new_task_row(draft: TaskDraft, user_id: &str, today: NaiveDate) -> NewTaskRow {
    NewTaskRow {
        user_id: user_id.to_string(),
        title: draft.title.unwrap_or_default(),
        description: draft.description.unwrap_or_default(),
        priority: draft.priority.unwrap_or_default().as_wire().to_string(),
        status: TaskStatus::Todo.as_wire().to_string(),
        due_date: format_date(draft.due_date.unwrap_or(today)),
        assignee: DEFAULT_ASSIGNEE.to_string(),
        tags: draft.tags.unwrap_or_default(),
        completed: false,
        ai_suggestion: None,
    }
}

/// Builds an event insert payload from a draft, normalizing the time to
/// second precision and defaulting the duration.
#[must_use]
pub fn new_event_row(draft: EventDraft, user_id: &str) -> NewEventRow {
    NewEventRow {
        user_id: user_id.to_string(),
        title: draft.title,
        description: draft.description,
        date: format_date(draft.date),
        time: format_time(normalize_time(&draft.time)),
        duration: draft
            .duration
            .unwrap_or_else(|| DEFAULT_EVENT_DURATION.to_string()),
    }
}

/// Builds a note insert payload from a draft; missing fields become empty.
#[must_use]
pub fn new_note_row(draft: NoteDraft, user_id: &str) -> NewNoteRow {
    NewNoteRow {
        user_id: user_id.to_string(),
        title: draft.title.unwrap_or_default(),
        content: draft.content.unwrap_or_default(),
        tags: draft.tags.unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Patches
// ---------------------------------------------------------------------------

/// Converts a domain task patch to its wire shape.
#[must_use]
pub fn task_patch_to_row(patch: &TaskPatch) -> TaskRowPatch {
    TaskRowPatch {
        title: patch.title.clone(),
        description: patch.description.clone(),
        priority: patch.priority.map(|p| p.as_wire().to_string()),
        status: patch.status.map(|s| s.as_wire().to_string()),
        due_date: patch.due_date.map(format_date),
        assignee: patch.assignee.clone(),
        tags: patch.tags.clone(),
        completed: patch.completed,
        ai_suggestion: patch.ai_suggestion.clone(),
    }
}

/// Merges a patch into a task in place; fields absent from the patch
/// keep their prior values.
pub fn apply_task_patch(task: &mut Task, patch: &TaskPatch) {
    if let Some(title) = &patch.title {
        task.title.clone_from(title);
    }
    if let Some(description) = &patch.description {
        task.description.clone_from(description);
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = due_date;
    }
    if let Some(assignee) = &patch.assignee {
        task.assignee.clone_from(assignee);
    }
    if let Some(tags) = &patch.tags {
        task.tags.clone_from(tags);
    }
    if let Some(completed) = patch.completed {
        task.completed = completed;
    }
    if let Some(suggestion) = &patch.ai_suggestion {
        task.ai_suggestion = Some(suggestion.clone());
    }
}

/// Merges a wire patch into a stored task row in place. Used by the
/// backend to apply partial updates column by column.
pub fn apply_row_patch(row: &mut TaskRow, patch: &TaskRowPatch) {
    if let Some(title) = &patch.title {
        row.title.clone_from(title);
    }
    if let Some(description) = &patch.description {
        row.description = Some(description.clone());
    }
    if let Some(priority) = &patch.priority {
        row.priority = Some(priority.clone());
    }
    if let Some(status) = &patch.status {
        row.status = Some(status.clone());
    }
    if let Some(due_date) = &patch.due_date {
        row.due_date.clone_from(due_date);
    }
    if let Some(assignee) = &patch.assignee {
        row.assignee = Some(assignee.clone());
    }
    if let Some(tags) = &patch.tags {
        row.tags = Some(tags.clone());
    }
    if let Some(completed) = patch.completed {
        row.completed = Some(completed);
    }
    if let Some(suggestion) = &patch.ai_suggestion {
        row.ai_suggestion = Some(suggestion.clone());
    }
}
