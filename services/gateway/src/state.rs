use std::sync::Arc;

use token_feed::broadcast::SubscriberRegistry;
use token_feed::store::TokenStore;

/// Shared application state, constructed once in `main` and passed by
/// clone to every handler. No hidden globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TokenStore>,
    pub registry: Arc<SubscriberRegistry>,
}

impl AppState {
    pub fn new(store: Arc<TokenStore>, registry: Arc<SubscriberRegistry>) -> Self {
        Self { store, registry }
    }
}
