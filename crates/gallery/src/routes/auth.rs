//! Authentication route handlers.
//!
//! Sign-in, registration (with the pre-network password strength gate and
//! the post-sign-up profile upsert), sign-out, and the email confirmation
//! landing. All auth work is delegated to the backend through the session
//! store.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use litart_core::{Email, PasswordStrength};

use crate::error::AppError;
use crate::filters;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::services::profiles;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub bio: String,
}

/// Query parameters for the confirmation landing.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

/// Registration success page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register_success.html")]
pub struct RegisterSuccessTemplate {
    pub email: String,
}

// =============================================================================
// Sign-in
// =============================================================================

/// Display the sign-in page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle sign-in form submission.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.sessions().sign_in(&form.email, &form.password).await {
        Ok(identity) => {
            tracing::debug!(user_id = %identity.id, "sign-in succeeded");
            Redirect::to("/profile").into_response()
        }
        Err(err) => {
            tracing::warn!("sign-in failed: {err}");
            redirect_with_error("/auth/login", &AppError::from(err).user_message())
                .into_response()
        }
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
///
/// Anything weaker than a strong password is rejected before any backend
/// call. After a successful sign-up the profile row is upserted keyed by
/// the new identity's id; the account stays unconfirmed until the user
/// follows the emailed link.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if Email::parse(&form.email).is_err() {
        return redirect_with_error("/auth/register", "Please enter a valid email address.")
            .into_response();
    }

    if !PasswordStrength::classify(&form.password).is_strong() {
        return redirect_with_error("/auth/register", "Please choose a stronger password.")
            .into_response();
    }

    let identity = match state
        .sessions()
        .sign_up(
            &form.email,
            &form.password,
            &state.config().auth_callback_url(),
        )
        .await
    {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!("registration failed: {err}");
            return redirect_with_error("/auth/register", &AppError::from(err).user_message())
                .into_response();
        }
    };

    if let Err(err) =
        profiles::create_profile(state.backend(), &identity, form.name, form.bio).await
    {
        tracing::error!("error creating profile: {err}");
        return redirect_with_error("/auth/register", &AppError::from(err).user_message())
            .into_response();
    }

    RegisterSuccessTemplate { email: form.email }.into_response()
}

// =============================================================================
// Sign-out
// =============================================================================

/// Handle sign-out. Always succeeds locally.
pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.sessions().sign_out().await;
    Redirect::to("/")
}

// =============================================================================
// Email confirmation landing
// =============================================================================

/// Landing page for the confirmation email link.
///
/// Resolves the session state and bounces to the profile (signed in) or
/// the sign-in page (confirmed, but no session on this device).
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    if let Some(err) = query.error {
        tracing::warn!("error during auth callback: {err}");
        return redirect_with_error("/auth/login", "Unable to confirm email");
    }

    if state.sessions().current().is_some() {
        redirect_with_success("/profile", "Email confirmed")
    } else {
        redirect_with_success("/auth/login", "Email confirmed! Please sign in.")
    }
}
