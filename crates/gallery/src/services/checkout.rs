//! Order submission to the external order endpoint.
//!
//! The endpoint is an external collaborator: it receives the tokenized
//! payment method plus order contents and answers `{success, error?}`.
//! No idempotency key, no retry.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use litart_core::UserId;

use crate::models::{CartItem, cart_total};
use crate::services::payments::{CardDetails, PaymentError, PaymentGateway};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Card tokenization failed.
    #[error("{0}")]
    Payment(#[from] PaymentError),

    /// The order endpoint could not be reached or answered garbage.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The order endpoint answered `success: false`.
    #[error("{0}")]
    Rejected(String),
}

/// Shipping fields collected before payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Body POSTed to the order endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderRequest<'a> {
    payment_method_id: &'a str,
    /// Total in cents.
    amount: i64,
    shipping_info: &'a ShippingInfo,
    items: &'a [CartItem],
    /// `null` for anonymous checkouts.
    user_id: Option<UserId>,
}

/// Response from the order endpoint.
#[derive(Debug, Deserialize)]
struct OrderResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the order-creation endpoint.
#[derive(Clone)]
pub struct OrderClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OrderClient {
    /// Create a client for the configured endpoint.
    #[must_use]
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Tokenize the card, then post the order.
    ///
    /// # Errors
    ///
    /// Returns tokenization failures as [`CheckoutError::Payment`],
    /// transport failures as [`CheckoutError::Network`], and a
    /// `success: false` answer as [`CheckoutError::Rejected`].
    #[instrument(skip_all, fields(items = items.len(), user_id = ?user_id))]
    pub async fn place_order(
        &self,
        gateway: &PaymentGateway,
        card: &CardDetails,
        shipping: &ShippingInfo,
        items: &[CartItem],
        user_id: Option<UserId>,
    ) -> Result<(), CheckoutError> {
        let payment_method = gateway.create_payment_method(card).await?;

        let request = OrderRequest {
            payment_method_id: &payment_method.id,
            amount: cart_total(items).to_cents(),
            shipping_info: shipping,
            items,
            user_id,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let outcome: OrderResponse = response.json().await?;
        if outcome.success {
            tracing::info!("order placed");
            Ok(())
        } else {
            Err(CheckoutError::Rejected(outcome.error.unwrap_or_else(
                || "An error occurred. Please try again.".to_string(),
            )))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use litart_core::{ArtworkId, Price};

    use super::*;

    #[test]
    fn test_order_request_wire_shape() {
        let shipping = ShippingInfo {
            name: "Mina".to_string(),
            address: "1 Elm St".to_string(),
            city: "Portland".to_string(),
            state: "OR".to_string(),
            zip_code: "97201".to_string(),
            country: "USA".to_string(),
        };
        let items = vec![CartItem {
            artwork_id: ArtworkId::random(),
            title: "Dusk".to_string(),
            artist: "Noor".to_string(),
            price: Price::parse("120.00").unwrap(),
        }];

        let request = OrderRequest {
            payment_method_id: "pm_123",
            amount: 12_000,
            shipping_info: &shipping,
            items: &items,
            user_id: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["paymentMethodId"], "pm_123");
        assert_eq!(value["amount"], 12_000);
        assert_eq!(value["shippingInfo"]["zipCode"], "97201");
        assert!(value["userId"].is_null());
        assert_eq!(value["items"][0]["title"], "Dusk");
    }

    #[test]
    fn test_order_response_parses_error() {
        let rejected: OrderResponse =
            serde_json::from_str(r#"{"success":false,"error":"Card declined"}"#).unwrap();
        assert!(!rejected.success);
        assert_eq!(rejected.error.as_deref(), Some("Card declined"));

        let accepted: OrderResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(accepted.success);
    }
}
