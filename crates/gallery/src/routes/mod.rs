//! HTTP route handlers for the gallery.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Home page
//! GET  /about               - About page
//! GET  /health              - Health check
//!
//! # Gallery
//! GET  /gallery             - Artwork grid (?category=..&sort=..)
//!
//! # Upload (requires auth)
//! GET  /upload              - Upload form
//! POST /upload              - Publish artwork (multipart)
//!
//! # Profile (requires auth)
//! GET  /profile             - Profile page
//! POST /profile             - Commit buffered edits
//! POST /profile/avatar      - Replace avatar (multipart)
//!
//! # Auth
//! GET  /auth/login          - Sign-in page
//! POST /auth/login          - Sign-in action
//! GET  /auth/register       - Registration page
//! POST /auth/register       - Registration action
//! POST /auth/logout         - Sign-out action
//! GET  /auth/callback       - Email confirmation landing
//!
//! # Cart
//! GET  /cart                - Cart page
//! POST /cart/add            - Add artwork to cart
//! POST /cart/remove         - Remove artwork from cart
//!
//! # Checkout
//! GET  /checkout            - Shipping + payment form
//! POST /checkout            - Tokenize card and place order
//! ```
//!
//! Every handler catches its own errors, converts them to user-facing
//! message strings, and surfaces them inline via `?error=`/`?success=`
//! query parameters on the page being re-rendered.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod gallery;
pub mod home;
pub mod profile;
pub mod upload;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::services::images::MAX_IMAGE_BYTES;
use crate::state::AppState;

/// Query parameters for inline error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Redirect back to `path` with an inline error message.
pub(crate) fn redirect_with_error(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(message)))
}

/// Redirect back to `path` with an inline success message.
pub(crate) fn redirect_with_success(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?success={}", urlencoding::encode(message)))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/callback", get(auth::callback))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show).post(profile::update))
        .route(
            "/avatar",
            post(profile::replace_avatar)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 1024 * 1024)),
        )
}

/// Create all routes for the gallery.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home + about
        .route("/", get(home::home))
        .route("/about", get(home::about))
        // Gallery
        .route("/gallery", get(gallery::index))
        // Upload (multipart needs headroom above the image ceiling)
        .route(
            "/upload",
            get(upload::form).post(upload::submit).layer(
                DefaultBodyLimit::max(MAX_IMAGE_BYTES + 1024 * 1024),
            ),
        )
        // Profile
        .nest("/profile", profile_routes())
        // Cart
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::form).post(checkout::submit))
        // Auth
        .nest("/auth", auth_routes())
}
