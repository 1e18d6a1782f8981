//! Password authentication against the backend auth API.
//!
//! The backend owns credentials, hashing, and email confirmation; this
//! module only forwards them and mirrors the resulting session. Every
//! successful state change fans out to `on_auth_state_change` subscribers
//! before the call returns.

use std::sync::Weak;
use std::sync::atomic::Ordering;

use secrecy::ExposeSecret;
use serde_json::json;
use thiserror::Error;
use tracing::instrument;

use super::client::{BackendClient, ClientInner, Observer};
use super::types::{AuthEvent, AuthSession, Identity, TokenResponse, WireUser};
use super::BackendError;

/// Auth API message for a sign-up from an email the backend refuses.
const EMAIL_NOT_AUTHORIZED: &str = "email_address_not_authorized";

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email/password combination (or unconfirmed email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend refuses to register this email address.
    #[error("email address not authorized for registration")]
    EmailNotAuthorized,

    /// An operation needing a session was called without one.
    #[error("no active session")]
    NotAuthenticated,

    /// Underlying backend failure.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Registration handle returned by [`BackendClient::on_auth_state_change`].
///
/// Dropping it deregisters the observer; callbacks never fire afterwards.
pub struct AuthSubscription {
    id: u64,
    client: Weak<ClientInner>,
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.client.upgrade()
            && let Ok(mut observers) = inner.observers.lock()
        {
            observers.retain(|observer| observer.id != self.id);
        }
    }
}

impl BackendClient {
    /// Register an auth-state observer.
    ///
    /// The callback is invoked synchronously on every sign-in, sign-out,
    /// and token refresh, in registration order. The returned handle
    /// deregisters on drop.
    pub fn on_auth_state_change<F>(&self, callback: F) -> AuthSubscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_observer_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut observers) = self.inner.observers.lock() {
            observers.push(Observer {
                id,
                callback: Box::new(callback),
            });
        }
        AuthSubscription {
            id,
            client: std::sync::Arc::downgrade(&self.inner),
        }
    }

    /// Sign in with an email and password.
    ///
    /// On success the session is cached and `SignedIn` is broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the backend rejects
    /// the pair, or [`AuthError::Backend`] for transport/API failures.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let url = self.endpoint("/auth/v1/token");
        let response = self
            .authed(self.inner.http.post(&url))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(BackendError::from)?;

        let response = match Self::check(response).await {
            Ok(response) => response,
            Err(BackendError::Api { status: 400 | 401, .. }) => {
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => return Err(err.into()),
        };

        let grant: TokenResponse = response.json().await.map_err(BackendError::from)?;
        let session = grant.into_session();
        let identity = session.identity.clone();
        self.store_session(session, AuthEvent::SignedIn);

        tracing::info!(user_id = %identity.id, "signed in");
        Ok(identity)
    }

    /// Register a new account.
    ///
    /// `email_redirect_to` is where the confirmation email lands the user.
    /// Deployments requiring confirmation return an identity without a
    /// session; deployments without it also establish a session (and
    /// broadcast `SignedIn`).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailNotAuthorized`] when the backend reports
    /// that specific denial, or [`AuthError::Backend`] otherwise.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        email_redirect_to: &str,
    ) -> Result<Identity, AuthError> {
        let url = self.endpoint("/auth/v1/signup");
        let response = self
            .authed(self.inner.http.post(&url))
            .query(&[("redirect_to", email_redirect_to)])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(BackendError::from)?;

        let response = match Self::check(response).await {
            Ok(response) => response,
            Err(BackendError::Api { message, .. }) if message == EMAIL_NOT_AUTHORIZED => {
                return Err(AuthError::EmailNotAuthorized);
            }
            Err(err) => return Err(err.into()),
        };

        // With email confirmation enabled the response is the bare user
        // object; otherwise it is a full token grant.
        let body: serde_json::Value = response.json().await.map_err(BackendError::from)?;
        if body.get("access_token").is_some() {
            let grant: TokenResponse =
                serde_json::from_value(body).map_err(BackendError::from)?;
            let session = grant.into_session();
            let identity = session.identity.clone();
            self.store_session(session, AuthEvent::SignedIn);
            tracing::info!(user_id = %identity.id, "signed up (auto-confirmed)");
            return Ok(identity);
        }

        let user: WireUser = serde_json::from_value(body).map_err(BackendError::from)?;
        let identity = Identity {
            id: user.id,
            email: user.email,
        };
        tracing::info!(user_id = %identity.id, "signed up (confirmation pending)");
        Ok(identity)
    }

    /// Sign out.
    ///
    /// Always succeeds locally: the cached session is dropped and
    /// `SignedOut` broadcast regardless of the network outcome. The server
    /// revocation is best-effort.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        if let Some(session) = self.get_session() {
            let url = self.endpoint("/auth/v1/logout");
            let result = self
                .inner
                .http
                .post(&url)
                .header("apikey", self.inner.anon_key.expose_secret())
                .bearer_auth(session.access_token.expose_secret())
                .send()
                .await;

            match result {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(status = %response.status(), "server-side sign-out failed");
                }
                Err(err) => tracing::warn!("server-side sign-out failed: {err}"),
                Ok(_) => {}
            }
        }

        self.clear_session();
    }

    /// Exchange the refresh token for a fresh access token.
    ///
    /// On success the session is replaced and `TokenRefreshed` broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] without a refreshable
    /// session, or [`AuthError::Backend`] if the exchange fails.
    #[instrument(skip(self))]
    pub async fn refresh_session(&self) -> Result<AuthSession, AuthError> {
        let refresh_token = self
            .get_session()
            .and_then(|s| s.refresh_token)
            .ok_or(AuthError::NotAuthenticated)?;

        let url = self.endpoint("/auth/v1/token");
        let response = self
            .authed(self.inner.http.post(&url))
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token.expose_secret() }))
            .send()
            .await
            .map_err(BackendError::from)?;

        let response = Self::check(response).await?;
        let grant: TokenResponse = response.json().await.map_err(BackendError::from)?;
        let session = grant.into_session();
        self.store_session(session.clone(), AuthEvent::TokenRefreshed);

        Ok(session)
    }
}
