//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::shopify::OrdersClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    shopify_client: OrdersClient,
}

impl AppState {
    /// Build the state from configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let shopify_client = OrdersClient::new(&config.shopify);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify_client,
            }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Order-fetch client.
    #[must_use]
    pub fn shopify(&self) -> &OrdersClient {
        &self.inner.shopify_client
    }
}
