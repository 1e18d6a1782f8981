//! Unified error handling with Sentry integration.
//!
//! Per-module error enums (auth, profile writes, storage, validation,
//! checkout) aggregate into [`AppError`]. Route handlers catch every error,
//! convert it to a user-facing message via [`AppError::user_message`], and
//! render it inline; nothing propagates further and nothing is retried.
//! Server-side failures are additionally captured to Sentry before the
//! response is produced.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::{AuthError, BackendError, StorageError};
use crate::services::checkout::CheckoutError;
use crate::services::payments::PaymentError;
use crate::services::profiles::ProfileWriteError;

/// Client-side validation failures. Display strings are the user-facing
/// messages, verbatim.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("File size exceeds 5MB limit")]
    FileTooLarge,

    #[error("Invalid file type. Please upload a JPEG, PNG, or GIF image.")]
    UnsupportedImageType,

    #[error("Please select an image to upload.")]
    MissingImage,

    #[error("Please choose a stronger password.")]
    WeakPassword,

    #[error("Please enter a valid price.")]
    InvalidPrice(#[from] litart_core::PriceError),

    #[error("Please enter a valid email address.")]
    InvalidEmail(#[from] litart_core::EmailError),

    #[error("Please select a category.")]
    InvalidCategory(#[from] litart_core::CategoryError),
}

/// Application-level error type for the gallery.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Profile write failed.
    #[error("Profile error: {0}")]
    ProfileWrite(#[from] ProfileWriteError),

    /// Object storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Client-side validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Checkout failed (tokenization, order endpoint, or rejection).
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Backend API operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The message rendered inline on the page the user is looking at.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(err) => match err {
                AuthError::EmailNotAuthorized => {
                    "This email address is not authorized for registration. \
                     Please contact the administrator."
                        .to_string()
                }
                AuthError::InvalidCredentials => "Invalid email or password.".to_string(),
                AuthError::NotAuthenticated => "You must be logged in.".to_string(),
                AuthError::Backend(_) => "Authentication failed. Please try again.".to_string(),
            },
            Self::ProfileWrite(err) => match err {
                ProfileWriteError::PermissionDenied => {
                    "Unable to save profile. Please try logging in.".to_string()
                }
                ProfileWriteError::Backend(_) => "Failed to update profile".to_string(),
            },
            Self::Validation(err) => err.to_string(),
            Self::Checkout(err) => match err {
                CheckoutError::Rejected(message) => message.clone(),
                CheckoutError::Payment(PaymentError::Card { message }) => message.clone(),
                CheckoutError::Payment(_) | CheckoutError::Network(_) => {
                    "An error occurred. Please try again.".to_string()
                }
            },
            Self::Storage(_) => "Upload failed. Please try again.".to_string(),
            Self::Backend(BackendError::NotFound(_)) | Self::NotFound(_) => {
                "Not found.".to_string()
            }
            Self::Backend(_) | Self::Internal(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
            Self::Unauthorized(_) => "You must be logged in.".to_string(),
            Self::BadRequest(message) => message.clone(),
        }
    }

    /// Status code used when an error escapes a handler unrendered.
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::InvalidCredentials | AuthError::NotAuthenticated)
            | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::EmailNotAuthorized) => StatusCode::FORBIDDEN,
            Self::Auth(_) | Self::Storage(_) | Self::Checkout(_) | Self::Backend(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::ProfileWrite(ProfileWriteError::PermissionDenied) => StatusCode::FORBIDDEN,
            Self::ProfileWrite(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side errors to Sentry
        if matches!(
            self,
            Self::Backend(_) | Self::Storage(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (self.status_code(), self.user_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::FileTooLarge.to_string(),
            "File size exceeds 5MB limit"
        );
        assert_eq!(
            ValidationError::UnsupportedImageType.to_string(),
            "Invalid file type. Please upload a JPEG, PNG, or GIF image."
        );
        assert_eq!(
            ValidationError::WeakPassword.to_string(),
            "Please choose a stronger password."
        );
    }

    #[test]
    fn test_email_not_authorized_user_message() {
        let err = AppError::Auth(AuthError::EmailNotAuthorized);
        assert!(err.user_message().contains("not authorized"));
    }

    #[test]
    fn test_permission_denied_says_log_in_again() {
        let err = AppError::ProfileWrite(ProfileWriteError::PermissionDenied);
        assert!(err.user_message().contains("try logging in"));
    }

    #[test]
    fn test_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("artwork".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("upload".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Validation(ValidationError::FileTooLarge)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
