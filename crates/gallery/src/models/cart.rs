//! The cart: transient, per-browser, never persisted to the backend.

use serde::{Deserialize, Serialize};

use litart_core::{ArtworkId, Price};

/// One artwork in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub artwork_id: ArtworkId,
    pub title: String,
    pub artist: String,
    pub price: Price,
}

/// Sum of item prices.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Price {
    items.iter().map(|item| item.price).sum()
}

/// Keys for data stored in the browser session.
pub mod session_keys {
    /// Key for the cart item list.
    pub const CART_ITEMS: &str = "cart_items";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(price: &str) -> CartItem {
        CartItem {
            artwork_id: ArtworkId::random(),
            title: "Dusk".to_string(),
            artist: "Mina".to_string(),
            price: Price::parse(price).unwrap(),
        }
    }

    #[test]
    fn test_cart_total() {
        let items = [item("10.00"), item("4.50"), item("0.50")];
        assert_eq!(cart_total(&items).to_cents(), 1500);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(cart_total(&[]), Price::ZERO);
    }
}
