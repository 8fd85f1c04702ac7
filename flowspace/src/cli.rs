//! Command-line surface: subcommand definitions and dispatch.
//!
//! Each invocation signs in with the configured token, hydrates the
//! domain store, runs one command against it, and exits. All mutations
//! go through the store so the confirmed-update semantics apply to the
//! CLI exactly as they would to a long-lived view.

use std::sync::Arc;

use thiserror::Error;

use flowspace_model::event::EventDraft;
use flowspace_model::map::{format_date, format_time};
use flowspace_model::note::NoteDraft;
use flowspace_model::task::{Priority, TaskDraft, TaskId, TaskPatch, TaskStatus};

use crate::config::ClientConfig;
use crate::gateway::{GatewayError, RestGateway, StoreGateway};
use crate::identity::{Identity, IdentityProvider};
use crate::store::{DomainStore, StoreError};

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// No bearer token was configured.
    #[error("no access token configured; pass --token or set [service].access_token")]
    NoCredentials,

    /// The token does not self-identify and no user id was given.
    #[error("token does not identify a user; pass --user or set [service].user_id")]
    NoUserId,

    /// Unrecognized priority string.
    #[error("unknown priority {0:?} (expected low, medium, or high)")]
    InvalidPriority(String),

    /// Unparseable calendar date.
    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Failure building the HTTP gateway.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Failure from a store operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Top-level subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Work with tasks.
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Work with calendar events.
    Events {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Work with notes.
    Notes {
        #[command(subcommand)]
        action: NoteAction,
    },
}

/// Task subcommands. Tasks are the only entity with update and delete.
#[derive(clap::Subcommand, Debug)]
pub enum TaskAction {
    /// List tasks, ascending by due date.
    List,
    /// Add a task; omitted fields get defaults.
    Add {
        /// Task title.
        #[arg(long)]
        title: String,
        /// Free-form description.
        #[arg(long)]
        description: Option<String>,
        /// Priority: low, medium, or high.
        #[arg(long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        due: Option<String>,
        /// Tag; repeat for multiple tags.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Mark a task completed.
    Done {
        /// Task identifier.
        id: String,
    },
    /// Delete a task.
    Rm {
        /// Task identifier.
        id: String,
    },
}

/// Event subcommands (insert and list only).
#[derive(clap::Subcommand, Debug)]
pub enum EventAction {
    /// List events, ascending by date then time.
    List,
    /// Add a calendar event.
    Add {
        /// Event title.
        #[arg(long)]
        title: String,
        /// Event date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Event time (HH:MM or HH:MM:SS).
        #[arg(long)]
        time: String,
        /// Duration label (e.g. "1h", "30m"); defaults to "1h".
        #[arg(long)]
        duration: Option<String>,
        /// Free-form description.
        #[arg(long)]
        description: Option<String>,
    },
}

/// Note subcommands (insert and list only).
#[derive(clap::Subcommand, Debug)]
pub enum NoteAction {
    /// List notes, newest first.
    List,
    /// Add a note; omitted fields become empty.
    Add {
        /// Note title.
        #[arg(long)]
        title: Option<String>,
        /// Note body.
        #[arg(long)]
        content: Option<String>,
        /// Tag; repeat for multiple tags.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

/// Signs in from the config, hydrates the store, and runs one command.
///
/// # Errors
///
/// Returns [`CliError`] when credentials are missing or malformed, when
/// the backend cannot be reached, or when the operation itself fails.
pub async fn run(config: &ClientConfig, command: Command) -> Result<(), CliError> {
    let token = config.access_token.clone().ok_or(CliError::NoCredentials)?;
    let user_id = config.resolved_user_id().ok_or(CliError::NoUserId)?;

    let (provider, source) = IdentityProvider::channel();
    let gateway = Arc::new(RestGateway::new(
        &config.service_url,
        config.request_timeout,
        provider.source(),
    )?);
    let mut store = DomainStore::new(gateway as Arc<dyn StoreGateway>, source);

    provider.sign_in(Identity::new(user_id, token));
    store.sync_identity().await?;

    match command {
        Command::Tasks { action } => run_task(&mut store, action).await,
        Command::Events { action } => run_event(&mut store, action).await,
        Command::Notes { action } => run_note(&mut store, action).await,
    }
}

async fn run_task(store: &mut DomainStore, action: TaskAction) -> Result<(), CliError> {
    match action {
        TaskAction::List => {
            for task in store.tasks() {
                print_task(task);
            }
        }
        TaskAction::Add {
            title,
            description,
            priority,
            due,
            tags,
        } => {
            let draft = TaskDraft {
                title: Some(title),
                description,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                due_date: due.as_deref().map(parse_date_strict).transpose()?,
                tags: if tags.is_empty() { None } else { Some(tags) },
            };
            let task = store.add_task(draft).await?;
            print_task(&task);
        }
        TaskAction::Done { id } => {
            let patch = TaskPatch {
                status: Some(TaskStatus::Completed),
                completed: Some(true),
                ..TaskPatch::default()
            };
            store.update_task(&TaskId::from_raw(id), patch).await?;
        }
        TaskAction::Rm { id } => {
            store.delete_task(&TaskId::from_raw(id)).await?;
        }
    }
    Ok(())
}

async fn run_event(store: &mut DomainStore, action: EventAction) -> Result<(), CliError> {
    match action {
        EventAction::List => {
            for event in store.events() {
                println!(
                    "{} {}  ({})  {}  {}",
                    format_date(event.date),
                    format_time(event.time),
                    event.duration,
                    event.id,
                    event.title
                );
            }
        }
        EventAction::Add {
            title,
            date,
            time,
            duration,
            description,
        } => {
            let draft = EventDraft {
                title,
                description,
                date: parse_date_strict(&date)?,
                time,
                duration,
            };
            let event = store.add_event(draft).await?;
            println!(
                "{} {}  ({})  {}  {}",
                format_date(event.date),
                format_time(event.time),
                event.duration,
                event.id,
                event.title
            );
        }
    }
    Ok(())
}

async fn run_note(store: &mut DomainStore, action: NoteAction) -> Result<(), CliError> {
    match action {
        NoteAction::List => {
            for note in store.notes() {
                println!(
                    "{}  {}  {}",
                    note.created_at.format("%Y-%m-%d %H:%M"),
                    note.id,
                    note.title
                );
            }
        }
        NoteAction::Add {
            title,
            content,
            tags,
        } => {
            let draft = NoteDraft {
                title,
                content,
                tags: if tags.is_empty() { None } else { Some(tags) },
            };
            let note = store.add_note(draft).await?;
            println!(
                "{}  {}  {}",
                note.created_at.format("%Y-%m-%d %H:%M"),
                note.id,
                note.title
            );
        }
    }
    Ok(())
}

fn print_task(task: &flowspace_model::task::Task) {
    let mark = if task.completed { 'x' } else { ' ' };
    println!(
        "[{mark}] {} {:<6} {}  {}",
        format_date(task.due_date),
        task.priority.as_wire(),
        task.id,
        task.title
    );
}

fn parse_priority(s: &str) -> Result<Priority, CliError> {
    Priority::from_wire(s).ok_or_else(|| CliError::InvalidPriority(s.to_string()))
}

fn parse_date_strict(s: &str) -> Result<chrono::NaiveDate, CliError> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(s.to_string()))
}
