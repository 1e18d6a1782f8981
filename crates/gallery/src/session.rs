//! The session store: process-wide authentication state.
//!
//! Exactly one of these exists, owned by `AppState` and injected wherever
//! auth state is read. It mirrors (never owns) the identity held by the
//! backend client, and has a single writer: the auth-state subscription
//! registered at construction. Handlers are readers only.
//!
//! # State machine
//!
//! ```text
//! Uninitialized -> Loading -> { Authenticated, Anonymous }
//!                              Authenticated <-> Anonymous
//! ```
//!
//! The `Authenticated <-> Anonymous` transitions are driven solely by
//! notifications from the backend client - never inferred locally. No
//! state is terminal.

use std::sync::Arc;

use tokio::sync::watch;

use crate::backend::{
    AuthError, AuthEvent, AuthSession, AuthSubscription, BackendClient, Identity,
};

/// Authentication state visible to readers.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Construction has not started resolving the session yet.
    #[default]
    Uninitialized,
    /// The initial session fetch has not resolved.
    Loading,
    /// A session is active.
    Authenticated(AuthSession),
    /// No session.
    Anonymous,
}

impl SessionState {
    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Process-wide auth context with one writer and many readers.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    backend: BackendClient,
    state: Arc<watch::Sender<SessionState>>,
    /// Deregisters the auth-state observer when the store is dropped at
    /// application teardown.
    _subscription: AuthSubscription,
}

impl SessionStore {
    /// Attach a store to a backend client.
    ///
    /// Registers the auth-state subscription (the single writer) and
    /// resolves the initial session from the client's cache.
    #[must_use]
    pub fn attach(backend: BackendClient) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        let state = Arc::new(state);

        let writer = Arc::clone(&state);
        let subscription = backend.on_auth_state_change(move |event| {
            let next = match event {
                AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => {
                    SessionState::Authenticated(session.clone())
                }
                AuthEvent::SignedOut => SessionState::Anonymous,
            };
            // send_replace delivers even while no reader is subscribed
            writer.send_replace(next);
        });

        // Initial fetch: the client's cache is authoritative and local, so
        // Loading resolves immediately.
        state.send_replace(SessionState::Loading);
        let initial = backend
            .get_session()
            .map_or(SessionState::Anonymous, SessionState::Authenticated);
        state.send_replace(initial);

        Self {
            inner: Arc::new(SessionStoreInner {
                backend,
                state,
                _subscription: subscription,
            }),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// The cached session and identity, or `None` before the initial fetch
    /// resolves or while anonymous.
    #[must_use]
    pub fn current(&self) -> Option<AuthSession> {
        self.state().session().cloned()
    }

    /// Watch for state changes (readers only; the subscription writes).
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Sign in. Delegates to the backend client; no retry, no rate-limit.
    /// The subscription applies the resulting state change.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`AuthError`] unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.inner.backend.sign_in_with_password(email, password).await
    }

    /// Register a new account, directing the confirmation email back to
    /// `email_redirect_to`.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`AuthError`] unchanged, including the
    /// distinguished [`AuthError::EmailNotAuthorized`].
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        email_redirect_to: &str,
    ) -> Result<Identity, AuthError> {
        self.inner
            .backend
            .sign_up(email, password, email_redirect_to)
            .await
    }

    /// Sign out. Always succeeds locally regardless of network outcome.
    pub async fn sign_out(&self) {
        self.inner.backend.sign_out().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::BackendConfig;
    use litart_core::{Email, UserId};

    fn test_backend() -> BackendClient {
        BackendClient::new(&BackendConfig {
            url: "https://project.supabase.co".to_string(),
            anon_key: SecretString::from("anon-key"),
        })
    }

    fn test_session() -> AuthSession {
        AuthSession {
            access_token: SecretString::from("jwt"),
            refresh_token: None,
            expires_at: None,
            identity: Identity {
                id: UserId::random(),
                email: Email::parse("artist@example.com").unwrap(),
            },
        }
    }

    #[test]
    fn test_initial_state_resolves_to_anonymous() {
        let store = SessionStore::attach(test_backend());
        assert!(matches!(store.state(), SessionState::Anonymous));
        assert!(store.current().is_none());
    }

    #[test]
    fn test_sign_in_notification_authenticates() {
        let backend = test_backend();
        let store = SessionStore::attach(backend.clone());

        let session = test_session();
        backend.notify(&AuthEvent::SignedIn(session.clone()));

        let current = store.current().unwrap();
        assert_eq!(current.identity, session.identity);
    }

    #[test]
    fn test_sign_out_notification_returns_to_anonymous() {
        let backend = test_backend();
        let store = SessionStore::attach(backend.clone());

        backend.notify(&AuthEvent::SignedIn(test_session()));
        assert!(store.current().is_some());

        backend.notify(&AuthEvent::SignedOut);
        assert!(matches!(store.state(), SessionState::Anonymous));
        assert!(store.current().is_none());
    }

    #[test]
    fn test_refresh_notification_overwrites_session() {
        let backend = test_backend();
        let store = SessionStore::attach(backend.clone());

        let first = test_session();
        backend.notify(&AuthEvent::SignedIn(first.clone()));

        let mut refreshed = first.clone();
        refreshed.access_token = SecretString::from("fresh-jwt");
        backend.notify(&AuthEvent::TokenRefreshed(refreshed));

        use secrecy::ExposeSecret;
        let current = store.current().unwrap();
        assert_eq!(current.access_token.expose_secret(), "fresh-jwt");
        assert_eq!(current.identity, first.identity);
    }

    #[test]
    fn test_states_cycle_indefinitely() {
        let backend = test_backend();
        let store = SessionStore::attach(backend.clone());

        for _ in 0..3 {
            backend.notify(&AuthEvent::SignedIn(test_session()));
            assert!(store.current().is_some());
            backend.notify(&AuthEvent::SignedOut);
            assert!(store.current().is_none());
        }
    }

    #[test]
    fn test_watch_sees_transitions() {
        let backend = test_backend();
        let store = SessionStore::attach(backend.clone());
        let watcher = store.watch();

        backend.notify(&AuthEvent::SignedIn(test_session()));
        assert!(matches!(
            &*watcher.borrow(),
            SessionState::Authenticated(_)
        ));
    }
}
