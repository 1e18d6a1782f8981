//! Backend client core: shared HTTP plumbing and auth-state fan-out.

use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex, RwLock};

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

use crate::config::BackendConfig;

use super::BackendError;
use super::types::{ApiErrorBody, AuthEvent, AuthSession};

/// A registered auth-state observer.
pub(crate) struct Observer {
    pub(crate) id: u64,
    pub(crate) callback: Box<dyn Fn(&AuthEvent) + Send + Sync>,
}

/// Client for the remote backend-as-a-service.
///
/// Cheap to clone; all state lives behind an `Arc`. The client owns the
/// current [`AuthSession`] - callers mirror it (via the session store) but
/// never mutate it directly.
#[derive(Clone)]
pub struct BackendClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) anon_key: SecretString,
    pub(crate) session: RwLock<Option<AuthSession>>,
    pub(crate) observers: Mutex<Vec<Observer>>,
    pub(crate) next_observer_id: AtomicU64,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: reqwest::Client::new(),
                base_url: config.url.clone(),
                anon_key: config.anon_key.clone(),
                session: RwLock::new(None),
                observers: Mutex::new(Vec::new()),
                next_observer_id: AtomicU64::new(0),
            }),
        }
    }

    /// The cached session, if any.
    ///
    /// Purely local - never triggers a network call.
    #[must_use]
    pub fn get_session(&self) -> Option<AuthSession> {
        self.inner
            .session
            .read()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Probe the auth service health endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), BackendError> {
        let response = self
            .authed(self.inner.http.get(self.endpoint("/auth/v1/health")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Build a full URL for an API path.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Attach the API key and bearer authorization to a request.
    ///
    /// The bearer is the current session's access token when signed in, and
    /// the anonymous key otherwise - the backend enforces row-level access
    /// from whichever it receives.
    pub(crate) fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        let anon = self.inner.anon_key.expose_secret().to_string();
        let bearer = self
            .get_session()
            .map_or_else(|| anon.clone(), |s| s.access_token.expose_secret().to_string());

        builder
            .header("apikey", anon)
            .bearer_auth(bearer)
    }

    /// Turn a non-success response into a [`BackendError::Api`].
    pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            code: parsed.code(),
            message: parsed
                .message()
                .unwrap_or_else(|| body.chars().take(200).collect()),
        })
    }

    // =========================================================================
    // Session bookkeeping + observer fan-out
    // =========================================================================

    /// Replace the cached session and notify observers.
    pub(crate) fn store_session(&self, session: AuthSession, event: fn(AuthSession) -> AuthEvent) {
        if let Ok(mut guard) = self.inner.session.write() {
            *guard = Some(session.clone());
        }
        self.notify(&event(session));
    }

    /// Drop the cached session and notify observers.
    pub(crate) fn clear_session(&self) {
        if let Ok(mut guard) = self.inner.session.write() {
            *guard = None;
        }
        self.notify(&AuthEvent::SignedOut);
    }

    /// Invoke every registered observer, synchronously, in registration order.
    pub(crate) fn notify(&self, event: &AuthEvent) {
        if let Ok(observers) = self.inner.observers.lock() {
            for observer in observers.iter() {
                (observer.callback)(event);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_client() -> BackendClient {
        BackendClient::new(&BackendConfig {
            url: "https://project.supabase.co".to_string(),
            anon_key: SecretString::from("anon-key"),
        })
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = test_client();
        assert_eq!(
            client.endpoint("/auth/v1/health"),
            "https://project.supabase.co/auth/v1/health"
        );
    }

    #[test]
    fn test_session_starts_empty() {
        assert!(test_client().get_session().is_none());
    }

    #[test]
    fn test_notify_reaches_observers() {
        let client = test_client();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_cb = Arc::clone(&seen);
        let _sub = client.on_auth_state_change(move |_event| {
            seen_cb.fetch_add(1, Ordering::SeqCst);
        });

        client.notify(&AuthEvent::SignedOut);
        client.notify(&AuthEvent::SignedOut);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dropped_subscription_stops_notifications() {
        let client = test_client();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_cb = Arc::clone(&seen);
        let sub = client.on_auth_state_change(move |_event| {
            seen_cb.fetch_add(1, Ordering::SeqCst);
        });

        client.notify(&AuthEvent::SignedOut);
        drop(sub);
        client.notify(&AuthEvent::SignedOut);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
