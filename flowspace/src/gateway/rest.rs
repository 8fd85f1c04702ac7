//! REST implementation of the store gateway.
//!
//! Talks JSON to the backend's `/v1/{tasks,events,notes}` routes with a
//! bearer token read from the injected [`IdentitySource`] at request
//! time, so a sign-out immediately invalidates in-flight callers and a
//! sign-in needs no gateway rebuild.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use flowspace_model::row::{
    EventRow, NewEventRow, NewNoteRow, NewTaskRow, NoteRow, TaskRow, TaskRowPatch,
};

use super::{GatewayError, StoreGateway};
use crate::identity::{AuthState, IdentitySource};

/// Gateway over the backend's REST surface.
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
    identity: IdentitySource,
}

impl RestGateway {
    /// Creates a gateway for the given service URL.
    ///
    /// `request_timeout` bounds every request end to end; without it a
    /// dead backend would leave callers suspended indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        identity: IdentitySource,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            identity,
        })
    }

    /// Returns the current access token, or [`GatewayError::NoSession`].
    fn token(&self) -> Result<String, GatewayError> {
        match self.identity.current() {
            AuthState::SignedIn(identity) => Ok(identity.access_token),
            AuthState::Loading | AuthState::SignedOut => Err(GatewayError::NoSession),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.base_url)
    }

    async fn get_rows<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, GatewayError> {
        let token = self.token()?;
        let response = self
            .client
            .get(self.url(table))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status));
        }
        response.json().await.map_err(transport)
    }

    async fn post_row<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let token = self.token()?;
        let response = self
            .client
            .post(self.url(table))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status));
        }
        response.json().await.map_err(transport)
    }
}

#[async_trait::async_trait]
impl StoreGateway for RestGateway {
    async fn list_tasks(&self) -> Result<Vec<TaskRow>, GatewayError> {
        self.get_rows("tasks").await
    }

    async fn list_events(&self) -> Result<Vec<EventRow>, GatewayError> {
        self.get_rows("events").await
    }

    async fn list_notes(&self) -> Result<Vec<NoteRow>, GatewayError> {
        self.get_rows("notes").await
    }

    async fn insert_task(&self, new: NewTaskRow) -> Result<TaskRow, GatewayError> {
        self.post_row("tasks", &new).await
    }

    async fn insert_event(&self, new: NewEventRow) -> Result<EventRow, GatewayError> {
        self.post_row("events", &new).await
    }

    async fn insert_note(&self, new: NewNoteRow) -> Result<NoteRow, GatewayError> {
        self.post_row("notes", &new).await
    }

    async fn update_task(&self, id: &str, patch: TaskRowPatch) -> Result<(), GatewayError> {
        let token = self.token()?;
        let response = self
            .client
            .patch(self.url(&format!("tasks/{id}")))
            .bearer_auth(token)
            .json(&patch)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_for_status(status))
        }
    }

    async fn delete_task(&self, id: &str) -> Result<(), GatewayError> {
        let token = self.token()?;
        let response = self
            .client
            .delete(self.url(&format!("tasks/{id}")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_for_status(status))
        }
    }
}

fn transport(e: reqwest::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

/// Maps a non-success HTTP status to the gateway error taxonomy.
fn error_for_status(status: StatusCode) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Denied,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        other => GatewayError::Rejected {
            status: other.as_u16(),
        },
    }
}
