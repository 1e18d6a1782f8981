//! Wire types for the remote backend APIs.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;

use litart_core::{Email, UserId};

/// The authenticated user, as reported by the backend.
///
/// Owned by the backend; this is a mirror carried inside [`AuthSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque user identifier issued by the backend.
    pub id: UserId,
    /// The email the identity signed up with.
    pub email: Email,
}

/// A live authentication session: identity plus the tokens that prove it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Bearer token attached to table/storage/RPC calls.
    pub access_token: SecretString,
    /// Token used to mint a fresh access token once it expires.
    pub refresh_token: Option<SecretString>,
    /// Access token expiry, when the backend reports one.
    pub expires_at: Option<DateTime<Utc>>,
    /// The identity this session belongs to.
    pub identity: Identity,
}

/// Auth state change pushed to `on_auth_state_change` subscribers.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A session was established (sign-in, or sign-up on deployments
    /// without email confirmation).
    SignedIn(AuthSession),
    /// The session was discarded.
    SignedOut,
    /// The access token was refreshed; identity is unchanged.
    TokenRefreshed(AuthSession),
}

/// A storage bucket, as listed by the storage API.
#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: bool,
}

// =============================================================================
// Raw wire payloads (private to the backend module)
// =============================================================================

/// Token grant response from the auth API.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix timestamp of expiry.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: WireUser,
}

/// User object embedded in auth responses.
#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub id: UserId,
    pub email: Email,
}

impl TokenResponse {
    /// Convert the raw grant into an [`AuthSession`].
    pub(crate) fn into_session(self) -> AuthSession {
        AuthSession {
            access_token: SecretString::from(self.access_token),
            refresh_token: self.refresh_token.map(SecretString::from),
            expires_at: self
                .expires_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            identity: Identity {
                id: self.user.id,
                email: self.user.email,
            },
        }
    }
}

/// Error body returned by the auth, table, and storage APIs.
///
/// The three APIs disagree on field names, so every candidate is optional
/// and [`ApiErrorBody::message`] picks the first one present.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ApiErrorBody {
    /// Best-effort human-readable message.
    pub(crate) fn message(&self) -> Option<String> {
        self.msg
            .clone()
            .or_else(|| self.message.clone())
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
    }

    /// Error code normalized to a string (PostgREST uses strings, the auth
    /// API uses numbers).
    pub(crate) fn code(&self) -> Option<String> {
        match &self.code {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_into_session() {
        let raw = r#"{
            "access_token": "jwt-token",
            "token_type": "bearer",
            "expires_at": 1754500000,
            "refresh_token": "refresh-me",
            "user": {
                "id": "4f2f1f60-9318-4b1e-a6b6-80e0e7a0a4f7",
                "email": "artist@example.com"
            }
        }"#;

        let parsed: TokenResponse = serde_json::from_str(raw).unwrap();
        let session = parsed.into_session();
        assert_eq!(session.identity.email.as_str(), "artist@example.com");
        assert!(session.refresh_token.is_some());
        assert!(session.expires_at.is_some());
    }

    #[test]
    fn test_api_error_body_message_precedence() {
        let gotrue: ApiErrorBody =
            serde_json::from_str(r#"{"code":400,"msg":"email_address_not_authorized"}"#).unwrap();
        assert_eq!(
            gotrue.message().as_deref(),
            Some("email_address_not_authorized")
        );
        assert_eq!(gotrue.code().as_deref(), Some("400"));

        let postgrest: ApiErrorBody = serde_json::from_str(
            r#"{"code":"42501","message":"permission denied","details":null,"hint":null}"#,
        )
        .unwrap();
        assert_eq!(postgrest.message().as_deref(), Some("permission denied"));
        assert_eq!(postgrest.code().as_deref(), Some("42501"));

        let oauth_style: ApiErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(
            oauth_style.message().as_deref(),
            Some("Invalid login credentials")
        );
    }

    #[test]
    fn test_bucket_deserialize_defaults() {
        let bucket: Bucket = serde_json::from_str(r#"{"id":"avatars","name":"avatars"}"#).unwrap();
        assert!(!bucket.public);
    }
}
