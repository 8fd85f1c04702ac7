//! Authenticated-identity signal shared between the auth layer and the
//! domain store.
//!
//! The auth layer owns an [`IdentityProvider`] and publishes the current
//! [`AuthState`] through a [`tokio::sync::watch`] channel. Consumers hold
//! an [`IdentitySource`] (the receiver half) and either poll the current
//! state or await change notifications. The domain store takes its
//! `IdentitySource` at construction time; nothing reads identity
//! ambiently.

use tokio::sync::watch;

/// The authenticated user principal for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque user identifier, used to stamp ownership on writes.
    pub user_id: String,
    /// Bearer token presented to the backend on every request.
    pub access_token: String,
}

impl Identity {
    /// Convenience constructor.
    #[must_use]
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
        }
    }
}

/// Current state of the authentication session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Auth is still resolving; consumers should hold off acting.
    #[default]
    Loading,
    /// No user is signed in.
    SignedOut,
    /// A user is signed in.
    SignedIn(Identity),
}

impl AuthState {
    /// Returns the signed-in identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn(identity) => Some(identity),
            Self::Loading | Self::SignedOut => None,
        }
    }
}

/// Publisher half of the identity signal, owned by the auth layer.
pub struct IdentityProvider {
    tx: watch::Sender<AuthState>,
}

impl IdentityProvider {
    /// Creates a provider/source pair. The initial state is
    /// [`AuthState::Loading`].
    #[must_use]
    pub fn channel() -> (Self, IdentitySource) {
        let (tx, rx) = watch::channel(AuthState::default());
        (Self { tx }, IdentitySource { rx })
    }

    /// Publishes a sign-in.
    pub fn sign_in(&self, identity: Identity) {
        let _ = self.tx.send(AuthState::SignedIn(identity));
    }

    /// Publishes a sign-out.
    pub fn sign_out(&self) {
        let _ = self.tx.send(AuthState::SignedOut);
    }

    /// Creates an additional source for the same signal.
    #[must_use]
    pub fn source(&self) -> IdentitySource {
        IdentitySource {
            rx: self.tx.subscribe(),
        }
    }
}

/// Consumer half of the identity signal.
#[derive(Clone)]
pub struct IdentitySource {
    rx: watch::Receiver<AuthState>,
}

impl IdentitySource {
    /// Returns a snapshot of the current auth state.
    #[must_use]
    pub fn current(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    /// Waits until the auth state changes.
    ///
    /// Returns the new state, or `None` if the provider was dropped.
    pub async fn changed(&mut self) -> Option<AuthState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
