//! In-memory row storage with per-user scoping.
//!
//! The [`TableStore`] holds three logical tables (tasks, events, notes),
//! each keyed by owning user and then by row identifier. All listing
//! operations return only the caller's rows, in the ordering the client
//! expects: tasks ascending by due date, events ascending by date then
//! time, notes descending by creation time.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use flowspace_model::map::apply_row_patch;
use flowspace_model::row::{
    EventRow, NewEventRow, NewNoteRow, NewTaskRow, NoteRow, TaskRow, TaskRowPatch,
};

/// Per-user tables, keyed by user id then row id.
#[derive(Default)]
struct Tables {
    tasks: HashMap<String, HashMap<String, TaskRow>>,
    events: HashMap<String, HashMap<String, EventRow>>,
    notes: HashMap<String, HashMap<String, NoteRow>>,
}

/// In-memory row store scoped by owning user.
///
/// Thread-safe via [`RwLock`]. Row identifiers are server-assigned
/// time-ordered UUID v7 strings; note `created_at` timestamps are
/// assigned on insert.
#[derive(Default)]
pub struct TableStore {
    inner: RwLock<Tables>,
}

impl TableStore {
    /// Creates a new, empty table store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id() -> String {
        Uuid::now_v7().to_string()
    }

    // --- tasks ---

    /// Lists the user's task rows, ascending by due date.
    pub async fn list_tasks(&self, user_id: &str) -> Vec<TaskRow> {
        let tables = self.inner.read().await;
        let mut rows: Vec<TaskRow> = tables
            .tasks
            .get(user_id)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default();
        // ISO dates compare correctly as strings; id breaks ties stably.
        rows.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));
        rows
    }

    /// Inserts a task row for its `user_id`, assigning a fresh identifier.
    pub async fn insert_task(&self, new: NewTaskRow) -> TaskRow {
        let row = TaskRow {
            id: Self::next_id(),
            user_id: new.user_id.clone(),
            title: new.title,
            description: Some(new.description),
            priority: Some(new.priority),
            status: Some(new.status),
            due_date: new.due_date,
            assignee: Some(new.assignee),
            tags: Some(new.tags),
            completed: Some(new.completed),
            ai_suggestion: new.ai_suggestion,
        };
        let mut tables = self.inner.write().await;
        tables
            .tasks
            .entry(new.user_id)
            .or_default()
            .insert(row.id.clone(), row.clone());
        row
    }

    /// Applies a partial update to the user's task row.
    ///
    /// Returns `false` when the row does not exist or belongs to a
    /// different user (indistinguishable by design).
    pub async fn patch_task(&self, user_id: &str, id: &str, patch: &TaskRowPatch) -> bool {
        let mut tables = self.inner.write().await;
        let Some(row) = tables.tasks.get_mut(user_id).and_then(|t| t.get_mut(id)) else {
            return false;
        };
        apply_row_patch(row, patch);
        true
    }

    /// Deletes the user's task row. Returns `false` when absent or foreign.
    pub async fn delete_task(&self, user_id: &str, id: &str) -> bool {
        let mut tables = self.inner.write().await;
        tables
            .tasks
            .get_mut(user_id)
            .is_some_and(|t| t.remove(id).is_some())
    }

    // --- events ---

    /// Lists the user's event rows, ascending by date then time.
    pub async fn list_events(&self, user_id: &str) -> Vec<EventRow> {
        let tables = self.inner.read().await;
        let mut rows: Vec<EventRow> = tables
            .events
            .get(user_id)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.time.cmp(&b.time))
                .then_with(|| a.id.cmp(&b.id))
        });
        rows
    }

    /// Inserts an event row for its `user_id`, assigning a fresh identifier.
    pub async fn insert_event(&self, new: NewEventRow) -> EventRow {
        let row = EventRow {
            id: Self::next_id(),
            user_id: new.user_id.clone(),
            title: new.title,
            description: new.description,
            date: new.date,
            time: new.time,
            duration: Some(new.duration),
        };
        let mut tables = self.inner.write().await;
        tables
            .events
            .entry(new.user_id)
            .or_default()
            .insert(row.id.clone(), row.clone());
        row
    }

    // --- notes ---

    /// Lists the user's note rows, descending by creation time.
    pub async fn list_notes(&self, user_id: &str) -> Vec<NoteRow> {
        let tables = self.inner.read().await;
        let mut rows: Vec<NoteRow> = tables
            .notes
            .get(user_id)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default();
        // created_at is always backend-stamped RFC 3339 UTC, so string
        // comparison orders chronologically.
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        rows
    }

    /// Inserts a note row for its `user_id`, assigning a fresh identifier
    /// and stamping `created_at`.
    pub async fn insert_note(&self, new: NewNoteRow) -> NoteRow {
        let row = NoteRow {
            id: Self::next_id(),
            user_id: new.user_id.clone(),
            title: new.title,
            content: new.content,
            tags: Some(new.tags),
            created_at: Utc::now().to_rfc3339(),
        };
        let mut tables = self.inner.write().await;
        tables
            .notes
            .entry(new.user_id)
            .or_default()
            .insert(row.id.clone(), row.clone());
        row
    }
}
