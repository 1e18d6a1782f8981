//! Remote backend-as-a-service client.
//!
//! # Architecture
//!
//! - One `reqwest` client behind an `Arc`, shared by every handler
//! - The backend is the source of truth - NO local persistence, direct API
//!   calls for auth, table CRUD, RPC, and object storage
//! - Auth state changes fan out through a synchronous observer registry;
//!   the session store is the only registered writer in this application
//!
//! # APIs
//!
//! ## Auth
//! - Password sign-in/sign-up, sign-out, token refresh
//! - Every state change notifies `on_auth_state_change` subscribers
//!
//! ## Tables
//! - `select`/`insert`/`update`/`upsert` with equality filters and ordering
//!
//! ## Storage
//! - Bucket listing/creation, object upload, public URL resolution
//!
//! ## RPC
//! - Generic invocation by function name and JSON argument map
//!
//! # Example
//!
//! ```rust,ignore
//! use litart_gallery::backend::{BackendClient, TableQuery};
//!
//! let client = BackendClient::new(&config.backend);
//!
//! let identity = client.sign_in_with_password("artist@example.com", "pw").await?;
//!
//! let artworks: Vec<Artwork> = client
//!     .select_rows("artworks", &TableQuery::new().order_desc("created_at"))
//!     .await?;
//! ```

mod auth;
mod client;
mod rpc;
mod storage;
mod tables;
pub mod types;

pub use auth::{AuthError, AuthSubscription};
pub use client::BackendClient;
pub use storage::StorageError;
pub use tables::TableQuery;
pub use types::*;

use thiserror::Error;

/// PostgREST error code for a row-level-security denial.
const PERMISSION_DENIED_CODE: &str = "42501";

/// Errors that can occur when talking to the remote backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found (empty result where one row was required).
    #[error("Not found: {0}")]
    NotFound(String),
}

impl BackendError {
    /// Whether this error is a row-level-security denial.
    ///
    /// Surfaced to users as "please log in again" by the profile flows.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::Api { code: Some(code), .. } if code == PERMISSION_DENIED_CODE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NotFound("profile".to_string());
        assert_eq!(err.to_string(), "Not found: profile");

        let err = BackendError::Api {
            status: 403,
            code: Some("42501".to_string()),
            message: "permission denied for table profiles".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error: 403 - permission denied for table profiles"
        );
    }

    #[test]
    fn test_is_permission_denied() {
        let denied = BackendError::Api {
            status: 403,
            code: Some("42501".to_string()),
            message: "permission denied".to_string(),
        };
        assert!(denied.is_permission_denied());

        let other = BackendError::Api {
            status: 400,
            code: Some("23505".to_string()),
            message: "duplicate key".to_string(),
        };
        assert!(!other.is_permission_denied());

        assert!(!BackendError::NotFound("x".to_string()).is_permission_denied());
    }
}
