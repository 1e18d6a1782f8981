//! Cart route handlers.
//!
//! The cart lives in the per-browser session only - it is never persisted
//! to the backend, and exists for the duration of a checkout session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use litart_core::ArtworkId;

use crate::backend::TableQuery;
use crate::filters;
use crate::models::{Artwork, CartItem, cart_total, session_keys};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub artwork_id: String,
    pub title: String,
    pub artist: String,
    pub price: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            artwork_id: item.artwork_id.to_string(),
            title: item.title.clone(),
            artist: item.artist.clone(),
            price: item.price.to_string(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the cart from the browser session.
pub(crate) async fn get_cart(session: &Session) -> Vec<CartItem> {
    session
        .get::<Vec<CartItem>>(session_keys::CART_ITEMS)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back to the browser session.
pub(crate) async fn set_cart(
    session: &Session,
    items: &[CartItem],
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART_ITEMS, items).await
}

/// Empty the cart (after a successful checkout).
pub(crate) async fn clear_cart(session: &Session) {
    if let Err(err) = session
        .remove::<Vec<CartItem>>(session_keys::CART_ITEMS)
        .await
    {
        tracing::warn!("failed to clear cart: {err}");
    }
}

// =============================================================================
// Forms and Templates
// =============================================================================

/// Add/remove form data.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    pub artwork_id: ArtworkId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub items: Vec<CartItemView>,
    pub item_count: usize,
    pub total: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
pub async fn show(session: Session) -> impl IntoResponse {
    let items = get_cart(&session).await;

    CartShowTemplate {
        item_count: items.len(),
        total: cart_total(&items).to_string(),
        items: items.iter().map(CartItemView::from).collect(),
    }
}

/// Add an artwork to the cart.
///
/// The row is fetched so the cart carries the title/artist/price snapshot
/// it will later send to the order endpoint.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartForm>,
) -> Response {
    let artwork: Artwork = match state
        .backend()
        .select_single("artworks", &TableQuery::new().eq("id", form.artwork_id))
        .await
    {
        Ok(artwork) => artwork,
        Err(err) => {
            tracing::warn!("error fetching artwork for cart: {err}");
            return Redirect::to("/gallery").into_response();
        }
    };

    let mut items = get_cart(&session).await;
    if !items.iter().any(|item| item.artwork_id == artwork.id) {
        items.push(CartItem {
            artwork_id: artwork.id,
            title: artwork.title.clone(),
            artist: artwork.artist_name().to_string(),
            price: artwork.price,
        });
    }

    if let Err(err) = set_cart(&session, &items).await {
        tracing::error!("failed to store cart: {err}");
    }

    Redirect::to("/cart").into_response()
}

/// Remove an artwork from the cart.
pub async fn remove(session: Session, Form(form): Form<CartForm>) -> Redirect {
    let mut items = get_cart(&session).await;
    items.retain(|item| item.artwork_id != form.artwork_id);

    if let Err(err) = set_cart(&session, &items).await {
        tracing::error!("failed to store cart: {err}");
    }

    Redirect::to("/cart")
}
