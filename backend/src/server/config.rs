//! HTTP server configuration object and helpers.

use std::sync::Arc;

use house_hunter::domain::TokenService;
use house_hunter::outbound::persistence::MongoStore;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) tokens: Arc<TokenService>,
    pub(crate) store: Option<MongoStore>,
}

impl ServerConfig {
    /// Construct a server configuration backed by in-memory storage.
    #[must_use]
    pub fn new(bind_addr: (String, u16), tokens: Arc<TokenService>) -> Self {
        Self {
            bind_addr,
            tokens,
            store: None,
        }
    }

    /// Attach a connected document store for the persistence adapters.
    #[must_use]
    pub fn with_store(mut self, store: MongoStore) -> Self {
        self.store = Some(store);
        self
    }
}
