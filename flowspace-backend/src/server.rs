//! HTTP server: shared state, router, and row-level request handlers.
//!
//! Every route resolves the caller's identity from the `Authorization`
//! header first; requests without a valid bearer token get `401`. Reads
//! never take a user id — they are implicitly scoped to the caller.
//! Writes must carry a `user_id` matching the caller (`403` otherwise).
//! Updates and deletes of rows that do not exist *or* belong to another
//! user both answer `404`, so foreign rows are indistinguishable from
//! missing ones.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use serde_json::json;

use flowspace_model::map::{format_date, format_time, normalize_time, parse_date};
use flowspace_model::row::{NewEventRow, NewNoteRow, NewTaskRow, TaskRowPatch};

use crate::auth::TokenAuth;
use crate::store::TableStore;

/// Shared server state: row storage plus token resolution.
pub struct AppState {
    /// Per-user row tables.
    pub store: TableStore,
    /// Bearer-token resolver.
    pub auth: TokenAuth,
}

impl AppState {
    /// Creates server state with an empty store and the given resolver.
    #[must_use]
    pub fn new(auth: TokenAuth) -> Self {
        Self {
            store: TableStore::new(),
            auth,
        }
    }
}

/// Builds the service router.
#[must_use]
pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/v1/tasks", get(list_tasks).post(insert_task))
        .route("/v1/tasks/{id}", patch(patch_task).delete(delete_task))
        .route("/v1/events", get(list_events).post(insert_event))
        .route("/v1/notes", get(list_notes).post(insert_note))
        .with_state(state)
}

/// Starts the server with default (empty-token-table, self-identifying
/// tokens enabled) state. Primary entry point for tests.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let state = Arc::new(AppState::new(TokenAuth::new(
        std::collections::HashMap::new(),
        true,
    )));
    start_server_with_state(addr, state).await
}

/// Starts the server with a pre-configured [`AppState`].
///
/// Binds the listener, spawns the serve task, and returns the bound
/// address plus a [`tokio::task::JoinHandle`] for cleanup.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<AppState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "backend server error");
        }
    });

    Ok((bound_addr, handle))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Resolves the caller from the request headers.
fn caller(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    state.auth.resolve(authorization)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "missing or invalid bearer token"})),
    )
        .into_response()
}

fn forbidden(reason: &str) -> Response {
    (StatusCode::FORBIDDEN, Json(json!({"error": reason}))).into_response()
}

fn unprocessable(reason: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"error": reason})),
    )
        .into_response()
}

async fn list_tasks(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(user_id) = caller(&state, &headers) else {
        return unauthorized();
    };
    Json(state.store.list_tasks(&user_id).await).into_response()
}

async fn insert_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(new): Json<NewTaskRow>,
) -> Response {
    let Some(user_id) = caller(&state, &headers) else {
        return unauthorized();
    };
    if new.user_id != user_id {
        tracing::warn!(caller = %user_id, claimed = %new.user_id, "task insert with foreign user_id");
        return forbidden("user_id does not match caller");
    }
    if format_date(parse_date(&new.due_date)) != new.due_date {
        return unprocessable("due_date is not a valid ISO date");
    }
    let row = state.store.insert_task(new).await;
    tracing::debug!(user_id = %user_id, id = %row.id, "task inserted");
    (StatusCode::CREATED, Json(row)).into_response()
}

async fn patch_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<TaskRowPatch>,
) -> Response {
    let Some(user_id) = caller(&state, &headers) else {
        return unauthorized();
    };
    if state.store.patch_task(&user_id, &id, &body).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let Some(user_id) = caller(&state, &headers) else {
        return unauthorized();
    };
    if state.store.delete_task(&user_id, &id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn list_events(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(user_id) = caller(&state, &headers) else {
        return unauthorized();
    };
    Json(state.store.list_events(&user_id).await).into_response()
}

async fn insert_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(new): Json<NewEventRow>,
) -> Response {
    let Some(user_id) = caller(&state, &headers) else {
        return unauthorized();
    };
    if new.user_id != user_id {
        return forbidden("user_id does not match caller");
    }
    if format_date(parse_date(&new.date)) != new.date {
        return unprocessable("date is not a valid ISO date");
    }
    if format_time(normalize_time(&new.time)) != new.time {
        return unprocessable("time is not a valid HH:MM:SS time");
    }
    let row = state.store.insert_event(new).await;
    tracing::debug!(user_id = %user_id, id = %row.id, "event inserted");
    (StatusCode::CREATED, Json(row)).into_response()
}

async fn list_notes(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(user_id) = caller(&state, &headers) else {
        return unauthorized();
    };
    Json(state.store.list_notes(&user_id).await).into_response()
}

async fn insert_note(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(new): Json<NewNoteRow>,
) -> Response {
    let Some(user_id) = caller(&state, &headers) else {
        return unauthorized();
    };
    if new.user_id != user_id {
        return forbidden("user_id does not match caller");
    }
    let row = state.store.insert_note(new).await;
    tracing::debug!(user_id = %user_id, id = %row.id, "note inserted");
    (StatusCode::CREATED, Json(row)).into_response()
}
