//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::GalleryConfig;
use crate::services::checkout::OrderClient;
use crate::services::payments::PaymentGateway;
use crate::session::SessionStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Owns the backend client, the session
/// store (attached to the client's auth-state channel at construction),
/// and the payment/order collaborators.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: GalleryConfig,
    backend: BackendClient,
    sessions: SessionStore,
    payments: PaymentGateway,
    orders: OrderClient,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: GalleryConfig) -> Self {
        let backend = BackendClient::new(&config.backend);
        let sessions = SessionStore::attach(backend.clone());
        let payments = PaymentGateway::new(&config.stripe_publishable_key);
        let orders = OrderClient::new(&config.order_endpoint_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                sessions,
                payments,
                orders,
            }),
        }
    }

    /// Get a reference to the gallery configuration.
    #[must_use]
    pub fn config(&self) -> &GalleryConfig {
        &self.inner.config
    }

    /// Get a reference to the remote backend client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Get a reference to the payment gateway client.
    #[must_use]
    pub fn payments(&self) -> &PaymentGateway {
        &self.inner.payments
    }

    /// Get a reference to the order endpoint client.
    #[must_use]
    pub fn orders(&self) -> &OrderClient {
        &self.inner.orders
    }
}
