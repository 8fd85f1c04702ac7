//! Domain store: the authoritative in-memory snapshot of the signed-in
//! user's tasks, events, and notes.
//!
//! The store mediates between consuming views and the remote gateway.
//! Mutations are confirmed-update: the remote write happens first and the
//! local collection changes only after it succeeds, so a gateway failure
//! leaves local state exactly as it was. Collections are replaced
//! wholesale on hydration and cleared on sign-out.
//!
//! The store is driven by a single logical task; views read snapshots via
//! the accessor methods and route every mutation through the operations
//! here. The identity signal is injected at construction -- see
//! [`crate::identity`].

use std::sync::Arc;

use chrono::Local;
use thiserror::Error;

use flowspace_model::event::{Event, EventDraft};
use flowspace_model::map::{
    apply_task_patch, event_from_row, new_event_row, new_note_row, new_task_row, note_from_row,
    task_from_row, task_patch_to_row,
};
use flowspace_model::note::{Note, NoteDraft};
use flowspace_model::task::{Task, TaskDraft, TaskId, TaskPatch};

use crate::gateway::{GatewayError, StoreGateway};
use crate::identity::{AuthState, Identity, IdentitySource};

/// Errors surfaced by domain store operations.
///
/// Every error leaves the local collections unchanged; callers decide
/// whether and how to report it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation requires a signed-in identity and none is present.
    #[error("no signed-in identity")]
    SignedOut,
    /// The remote call failed; no local mutation was applied.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Synchronization state of the store with respect to the identity signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// No user; collections are empty.
    SignedOut,
    /// A user is signed in but the last hydration attempt has not
    /// succeeded yet (initial load or retry after a failed fetch).
    Hydrating(Identity),
    /// Collections reflect a completed hydration for this identity.
    Ready(Identity),
}

/// In-memory snapshot of the current user's entities, kept in sync with
/// the backend through a [`StoreGateway`].
pub struct DomainStore {
    gateway: Arc<dyn StoreGateway>,
    identity: IdentitySource,
    session: Session,
    tasks: Vec<Task>,
    events: Vec<Event>,
    notes: Vec<Note>,
}

impl DomainStore {
    /// Creates a store over the given gateway and identity signal.
    ///
    /// The store starts signed out and empty; call
    /// [`sync_identity`](Self::sync_identity) to pick up the current
    /// auth state.
    #[must_use]
    pub fn new(gateway: Arc<dyn StoreGateway>, identity: IdentitySource) -> Self {
        Self {
            gateway,
            identity,
            session: Session::SignedOut,
            tasks: Vec::new(),
            events: Vec::new(),
            notes: Vec::new(),
        }
    }

    // -----------------------------------------------------------------
    // Snapshot accessors
    // -----------------------------------------------------------------

    /// Current task snapshot. Hydration order is ascending due date;
    /// newly added tasks are prepended.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Current event snapshot. Hydration order is ascending date/time;
    /// newly added events are prepended.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Current note snapshot, newest first.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Current synchronization state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    // -----------------------------------------------------------------
    // Identity-driven hydration
    // -----------------------------------------------------------------

    /// Reconciles the store with the current auth state: hydrates when a
    /// user is (or has become) signed in, clears on sign-out, and does
    /// nothing while auth is still loading.
    ///
    /// Each hydration is issued for a specific identity; if the identity
    /// changes while the fetch is in flight, the fetched rows are
    /// discarded and reconciliation restarts against the new identity,
    /// so one user's rows can never land in another user's snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Gateway`] when the fetch fails; the
    /// collections keep their previous contents and the session stays
    /// in [`Session::Hydrating`] so a later call retries.
    pub async fn sync_identity(&mut self) -> Result<(), StoreError> {
        loop {
            match self.identity.current() {
                AuthState::Loading => return Ok(()),
                AuthState::SignedOut => {
                    if self.session != Session::SignedOut {
                        tracing::info!("signed out, clearing collections");
                    }
                    self.clear();
                    return Ok(());
                }
                AuthState::SignedIn(identity) => {
                    if matches!(&self.session, Session::Ready(ready) if *ready == identity) {
                        return Ok(());
                    }
                    self.session = Session::Hydrating(identity.clone());
                    tracing::debug!(user_id = %identity.user_id, "hydrating collections");

                    let fetched = self.fetch_all().await;

                    // The identity may have changed while the fetch was in
                    // flight; a snapshot fetched for the old identity must
                    // never be applied to the new one.
                    if self.identity.current() != AuthState::SignedIn(identity.clone()) {
                        tracing::warn!(
                            user_id = %identity.user_id,
                            "discarding hydration for superseded identity"
                        );
                        continue;
                    }

                    match fetched {
                        Ok((tasks, events, notes)) => {
                            self.tasks = tasks;
                            self.events = events;
                            self.notes = notes;
                            self.session = Session::Ready(identity.clone());
                            tracing::info!(
                                user_id = %identity.user_id,
                                tasks = self.tasks.len(),
                                events = self.events.len(),
                                notes = self.notes.len(),
                                "hydration complete"
                            );
                            return Ok(());
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "hydration failed, keeping previous state");
                            return Err(e.into());
                        }
                    }
                }
            }
        }
    }

    /// Fetches and maps all three collections.
    async fn fetch_all(&self) -> Result<(Vec<Task>, Vec<Event>, Vec<Note>), GatewayError> {
        let tasks = self.gateway.list_tasks().await?;
        let events = self.gateway.list_events().await?;
        let notes = self.gateway.list_notes().await?;
        Ok((
            tasks.into_iter().map(task_from_row).collect(),
            events.into_iter().map(event_from_row).collect(),
            notes.into_iter().map(note_from_row).collect(),
        ))
    }

    fn clear(&mut self) {
        self.tasks.clear();
        self.events.clear();
        self.notes.clear();
        self.session = Session::SignedOut;
    }

    /// Returns the signed-in identity or [`StoreError::SignedOut`].
    fn require_identity(&self) -> Result<Identity, StoreError> {
        match self.identity.current() {
            AuthState::SignedIn(identity) => Ok(identity),
            AuthState::Loading | AuthState::SignedOut => Err(StoreError::SignedOut),
        }
    }

    // -----------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------

    /// Creates a task from a draft, filling in defaults (due date today,
    /// medium priority, todo status), and prepends it to the snapshot
    /// once the backend confirms the insert.
    ///
    /// # Errors
    ///
    /// [`StoreError::SignedOut`] without an identity;
    /// [`StoreError::Gateway`] when the insert fails (no local change).
    pub async fn add_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let identity = self.require_identity()?;
        let today = Local::now().date_naive();
        let payload = new_task_row(draft, &identity.user_id, today);
        let row = self.gateway.insert_task(payload).await?;
        let task = task_from_row(row);
        tracing::debug!(id = %task.id, "task added");
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Creates a calendar event from a draft, normalizing the time to
    /// second precision and defaulting the duration, and prepends it to
    /// the snapshot once the backend confirms the insert.
    ///
    /// # Errors
    ///
    /// Same contract as [`add_task`](Self::add_task).
    pub async fn add_event(&mut self, draft: EventDraft) -> Result<Event, StoreError> {
        let identity = self.require_identity()?;
        let payload = new_event_row(draft, &identity.user_id);
        let row = self.gateway.insert_event(payload).await?;
        let event = event_from_row(row);
        tracing::debug!(id = %event.id, "event added");
        self.events.insert(0, event.clone());
        Ok(event)
    }

    /// Creates a note from a draft (missing fields become empty) and
    /// prepends it to the snapshot once the backend confirms the insert.
    ///
    /// # Errors
    ///
    /// Same contract as [`add_task`](Self::add_task).
    pub async fn add_note(&mut self, draft: NoteDraft) -> Result<Note, StoreError> {
        let identity = self.require_identity()?;
        let payload = new_note_row(draft, &identity.user_id);
        let row = self.gateway.insert_note(payload).await?;
        let note = note_from_row(row);
        tracing::debug!(id = %note.id, "note added");
        self.notes.insert(0, note.clone());
        Ok(note)
    }

    /// Applies a partial update to a task: remote write first, then the
    /// same patch is merged into the matching local entry by identifier.
    ///
    /// When no local entry matches (e.g. the task was never hydrated
    /// here), the remote write stands and the snapshot is left alone --
    /// the store does not invent local state.
    ///
    /// # Errors
    ///
    /// [`StoreError::SignedOut`] without an identity;
    /// [`StoreError::Gateway`] when the remote update fails (no local
    /// change).
    pub async fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Result<(), StoreError> {
        self.require_identity()?;
        if patch.is_empty() {
            return Ok(());
        }
        self.gateway
            .update_task(id.as_str(), task_patch_to_row(&patch))
            .await?;
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
            apply_task_patch(task, &patch);
            tracing::debug!(id = %id, "task updated");
        }
        Ok(())
    }

    /// Deletes a task: remote delete first, then the matching local
    /// entry is removed. A locally-unknown identifier is a no-op after
    /// the remote write.
    ///
    /// # Errors
    ///
    /// [`StoreError::SignedOut`] without an identity;
    /// [`StoreError::Gateway`] when the remote delete fails (no local
    /// change).
    pub async fn delete_task(&mut self, id: &TaskId) -> Result<(), StoreError> {
        self.require_identity()?;
        self.gateway.delete_task(id.as_str()).await?;
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != *id);
        if self.tasks.len() < before {
            tracing::debug!(id = %id, "task deleted");
        }
        Ok(())
    }
}
