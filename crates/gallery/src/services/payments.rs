//! Payment gateway client for card tokenization.
//!
//! Raw card details go straight to the gateway and come back as an opaque
//! payment-method id; this application never stores or logs them. The
//! publishable key authorizes tokenization only - charging happens behind
//! the order endpoint.

use serde::Deserialize;
use thiserror::Error;

/// Payment gateway API base URL.
const BASE_URL: &str = "https://api.stripe.com/v1";

/// Errors that can occur during tokenization.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway rejected the card.
    #[error("{message}")]
    Card { message: String },

    /// Failed to parse the gateway response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Card fields collected by the checkout form.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvc: String,
}

/// A tokenized payment method.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethod {
    /// Opaque id, forwarded to the order endpoint.
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the payment gateway's tokenization API.
#[derive(Clone)]
pub struct PaymentGateway {
    client: reqwest::Client,
    publishable_key: String,
}

impl PaymentGateway {
    /// Create a new gateway client with the publishable key configured at
    /// startup.
    #[must_use]
    pub fn new(publishable_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            publishable_key: publishable_key.to_string(),
        }
    }

    /// Tokenize a card into a payment method.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::Card`] with the gateway's message when the
    /// card is declined or malformed, and transport/parse errors otherwise.
    pub async fn create_payment_method(
        &self,
        card: &CardDetails,
    ) -> Result<PaymentMethod, PaymentError> {
        let url = format!("{BASE_URL}/payment_methods");
        let params = [
            ("type", "card"),
            ("card[number]", card.number.as_str()),
            ("card[exp_month]", card.exp_month.as_str()),
            ("card[exp_year]", card.exp_year.as_str()),
            ("card[cvc]", card.cvc.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.publishable_key)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GatewayErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error.message)
                .unwrap_or_else(|| "An error occurred. Please try again.".to_string());
            return Err(PaymentError::Card { message });
        }

        response
            .json::<PaymentMethod>()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_body_parses() {
        let raw = r#"{"error":{"type":"card_error","code":"incorrect_number","message":"Your card number is incorrect."}}"#;
        let parsed: GatewayErrorBody = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.error.message.as_deref(),
            Some("Your card number is incorrect.")
        );
    }

    #[test]
    fn test_payment_method_parses() {
        let raw = r#"{"id":"pm_1NXWPnGh","object":"payment_method","type":"card"}"#;
        let parsed: PaymentMethod = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, "pm_1NXWPnGh");
    }
}
