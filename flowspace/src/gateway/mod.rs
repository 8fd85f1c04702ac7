//! Remote store gateway: the typed seam between the domain store and the
//! backend's row storage.
//!
//! Reads are implicitly scoped by the caller's credentials -- no gateway
//! operation takes a user identifier for a read. Writes carry the owner
//! explicitly inside their payload (`user_id` on the `New*Row` shapes).
//!
//! Events and notes deliberately expose only insert + list; tasks are the
//! only entity with update and delete.

pub mod rest;

use async_trait::async_trait;
use thiserror::Error;

use flowspace_model::row::{
    EventRow, NewEventRow, NewNoteRow, NewTaskRow, NoteRow, TaskRow, TaskRowPatch,
};

pub use rest::RestGateway;

/// Errors surfaced by gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No signed-in identity to authenticate the request with.
    #[error("no active session")]
    NoSession,
    /// Network-level failure (connect, timeout, malformed body).
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend refused the credentials or the row access (401/403).
    #[error("access denied by backend")]
    Denied,
    /// The referenced row does not exist (or is not visible to the caller).
    #[error("row not found")]
    NotFound,
    /// Any other backend rejection.
    #[error("backend rejected the request (status {status})")]
    Rejected {
        /// HTTP status code returned by the backend.
        status: u16,
    },
}

/// Row-level CRUD against the backend, scoped to the current caller.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Lists the caller's task rows, ascending by due date.
    async fn list_tasks(&self) -> Result<Vec<TaskRow>, GatewayError>;

    /// Lists the caller's event rows, ascending by date then time.
    async fn list_events(&self) -> Result<Vec<EventRow>, GatewayError>;

    /// Lists the caller's note rows, descending by creation time.
    async fn list_notes(&self) -> Result<Vec<NoteRow>, GatewayError>;

    /// Inserts a task row; returns the stored row with its assigned id.
    async fn insert_task(&self, new: NewTaskRow) -> Result<TaskRow, GatewayError>;

    /// Inserts an event row; returns the stored row with its assigned id.
    async fn insert_event(&self, new: NewEventRow) -> Result<EventRow, GatewayError>;

    /// Inserts a note row; returns the stored row with its assigned id
    /// and creation timestamp.
    async fn insert_note(&self, new: NewNoteRow) -> Result<NoteRow, GatewayError>;

    /// Applies a partial update to one of the caller's task rows.
    async fn update_task(&self, id: &str, patch: TaskRowPatch) -> Result<(), GatewayError>;

    /// Deletes one of the caller's task rows.
    async fn delete_task(&self, id: &str) -> Result<(), GatewayError>;
}
