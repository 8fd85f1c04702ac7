//! Domain model and wire mapping for `FlowSpace`.
//!
//! Defines the in-process shapes of the three entities (tasks, calendar
//! events, notes), the snake_case JSON row shapes exchanged with the
//! backend, and the pure mapping functions between them.

pub mod event;
pub mod map;
pub mod note;
pub mod row;
pub mod task;

pub use event::{Event, EventDraft, EventId};
pub use note::{Note, NoteDraft, NoteId};
pub use task::{Priority, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
