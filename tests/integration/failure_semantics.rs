//! Integration tests for failure semantics: a remote failure must never
//! mutate local state, and a failed hydration must stay retryable.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use flowspace::gateway::{GatewayError, RestGateway};
use flowspace::identity::{Identity, IdentityProvider};
use flowspace::store::{DomainStore, Session, StoreError};
use flowspace_model::task::{TaskDraft, TaskPatch};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

async fn start_backend() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    flowspace_backend::server::start_server("127.0.0.1:0")
        .await
        .expect("start backend")
}

/// Builds a store pointed at `url` (which may be unreachable).
fn make_store(url: &str) -> (IdentityProvider, DomainStore) {
    let (provider, source) = IdentityProvider::channel();
    let gateway = RestGateway::new(url, Duration::from_secs(2), provider.source())
        .expect("gateway");
    let store = DomainStore::new(Arc::new(gateway), source);
    (provider, store)
}

fn alice() -> Identity {
    Identity::new("alice", "user:alice")
}

fn titled(title: &str) -> TaskDraft {
    TaskDraft {
        title: Some(title.to_string()),
        ..TaskDraft::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hydration_against_dead_backend_fails_but_stays_retryable() {
    // Reserve a port and close it again so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let dead_addr = listener.local_addr().expect("addr");
    drop(listener);

    let (auth, mut store) = make_store(&format!("http://{dead_addr}"));
    auth.sign_in(alice());

    let err = store.sync_identity().await.expect_err("should fail");
    assert!(matches!(
        err,
        StoreError::Gateway(GatewayError::Transport(_))
    ));
    assert_eq!(*store.session(), Session::Hydrating(alice()));
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn mutations_against_dead_backend_leave_state_unchanged() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let dead_addr = listener.local_addr().expect("addr");
    drop(listener);

    let (auth, mut store) = make_store(&format!("http://{dead_addr}"));
    auth.sign_in(alice());
    let _ = store.sync_identity().await;

    let err = store.add_task(titled("lost")).await.expect_err("should fail");
    assert!(matches!(
        err,
        StoreError::Gateway(GatewayError::Transport(_))
    ));
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn revoked_credentials_mid_session_preserve_snapshot_exactly() {
    let (addr, _server) = start_backend().await;
    let (auth, mut store) = make_store(&format!("http://{addr}"));
    auth.sign_in(alice());
    store.sync_identity().await.expect("sync");

    let task = store.add_task(titled("survivor")).await.expect("add");
    store.add_task(titled("second")).await.expect("add");

    // The session token goes bad (an empty `user:` token resolves to no
    // user); every subsequent remote call is denied.
    auth.sign_in(Identity::new("alice", "user:"));

    let before = store.tasks().to_vec();

    let update = store
        .update_task(
            &task.id,
            TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
        .await;
    assert!(matches!(
        update,
        Err(StoreError::Gateway(GatewayError::Denied))
    ));

    let delete = store.delete_task(&task.id).await;
    assert!(matches!(
        delete,
        Err(StoreError::Gateway(GatewayError::Denied))
    ));

    let add = store.add_task(titled("never lands")).await;
    assert!(matches!(add, Err(StoreError::Gateway(GatewayError::Denied))));

    // Bit-for-bit identical snapshot after three failed mutations.
    assert_eq!(store.tasks(), before.as_slice());
}

#[tokio::test]
async fn mutations_without_identity_fail_before_any_network_io() {
    // Unroutable URL: if the session gate works we never touch it.
    let (_auth, mut store) = make_store("http://127.0.0.1:1");

    let err = store.add_task(titled("nope")).await.expect_err("should fail");
    assert!(matches!(err, StoreError::SignedOut));
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn denied_credentials_surface_as_typed_error() {
    let (addr, _server) = start_backend().await;

    // An empty `user:` token resolves to no user on the backend.
    let (auth, mut store) = make_store(&format!("http://{addr}"));
    auth.sign_in(Identity::new("alice", "user:"));

    let err = store.sync_identity().await.expect_err("should fail");
    assert!(matches!(err, StoreError::Gateway(GatewayError::Denied)));
    assert!(store.tasks().is_empty());
}
