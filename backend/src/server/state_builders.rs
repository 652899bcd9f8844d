//! Builders for the HTTP state from the configured storage backend.

use std::sync::Arc;

use house_hunter::inbound::http::state::{HttpState, HttpStatePorts};
use house_hunter::outbound::memory::{
    MemoryBookingRepository, MemoryHouseRepository, MemoryUserRepository,
};
use house_hunter::outbound::persistence::{
    MongoBookingRepository, MongoHouseRepository, MongoStore, MongoUserRepository,
};
use tracing::warn;

use super::ServerConfig;

fn mongo_ports(store: &MongoStore) -> HttpStatePorts {
    HttpStatePorts::from_repositories(
        Arc::new(MongoUserRepository::new(store.clone())),
        Arc::new(MongoHouseRepository::new(store.clone())),
        Arc::new(MongoBookingRepository::new(store.clone())),
    )
}

fn memory_ports() -> HttpStatePorts {
    HttpStatePorts::from_repositories(
        Arc::new(MemoryUserRepository::new()),
        Arc::new(MemoryHouseRepository::new()),
        Arc::new(MemoryBookingRepository::new()),
    )
}

/// Build the shared HTTP state, using MongoDB when a store is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let ports = match &config.store {
        Some(store) => mongo_ports(store),
        None => {
            warn!("no document store configured; data will not survive a restart");
            memory_ports()
        }
    };
    HttpState::new(ports, config.tokens.clone())
}
