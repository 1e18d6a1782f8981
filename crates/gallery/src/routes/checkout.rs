//! Checkout route handlers.
//!
//! Shipping fields and card fields are collected in one form; the card is
//! tokenized by the payment gateway and only the resulting opaque id is
//! forwarded to the order endpoint. Anonymous checkout is allowed - the
//! order is simply placed with a null user id.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::cart_total;
use crate::routes::cart::{CartItemView, clear_cart, get_cart};
use crate::routes::{MessageQuery, redirect_with_error};
use crate::services::checkout::ShippingInfo;
use crate::services::payments::CardDetails;
use crate::state::AppState;

/// Checkout form data: shipping plus raw card fields.
#[derive(Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub card_number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvc: String,
}

// Card fields never appear in logs or error reports.
impl std::fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("name", &self.name)
            .field("city", &self.city)
            .field("country", &self.country)
            .field("card_number", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/form.html")]
pub struct CheckoutTemplate {
    pub items: Vec<CartItemView>,
    pub item_count: usize,
    pub total: String,
    pub error: Option<String>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct CheckoutSuccessTemplate;

/// Display the checkout page with the order summary.
pub async fn form(session: Session, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    let items = get_cart(&session).await;

    CheckoutTemplate {
        item_count: items.len(),
        total: cart_total(&items).to_string(),
        items: items.iter().map(CartItemView::from).collect(),
        error: query.error,
    }
}

/// Tokenize the card and place the order.
///
/// On success the cart is cleared and the confirmation page rendered; on
/// failure the user is bounced back to the form with the message inline.
/// No idempotency key, no retry.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let items = get_cart(&session).await;
    if items.is_empty() {
        return redirect_with_error("/checkout", "Your cart is empty.").into_response();
    }

    let shipping = ShippingInfo {
        name: form.name,
        address: form.address,
        city: form.city,
        state: form.state,
        zip_code: form.zip_code,
        country: form.country,
    };
    let card = CardDetails {
        number: form.card_number,
        exp_month: form.exp_month,
        exp_year: form.exp_year,
        cvc: form.cvc,
    };

    let user_id = identity.map(|identity| identity.id);

    match state
        .orders()
        .place_order(state.payments(), &card, &shipping, &items, user_id)
        .await
    {
        Ok(()) => {
            clear_cart(&session).await;
            CheckoutSuccessTemplate.into_response()
        }
        Err(err) => {
            tracing::warn!("checkout failed: {err}");
            redirect_with_error("/checkout", &AppError::from(err).user_message())
                .into_response()
        }
    }
}
