//! Backend entry-point: loads settings, connects storage, and serves the API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use house_hunter::domain::TokenService;
use house_hunter::inbound::http::health::HealthState;
use house_hunter::inbound::http::token_config::{BuildMode, token_settings};
use house_hunter::outbound::persistence::{MongoStore, StoreConfig};
use house_hunter::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let tokens = token_settings(
        settings.token_secret.as_deref(),
        settings.token_ttl_secs,
        BuildMode::from_debug_assertions(),
    )
    .map_err(std::io::Error::other)?;
    let tokens = Arc::new(TokenService::new(
        &tokens.secret,
        tokens.ttl,
        Arc::new(DefaultClock),
    ));

    let (host, port) = settings.bind_addr();
    let mut config = ServerConfig::new((host.to_owned(), port), tokens);
    let mut health = HealthState::new();
    if let Some(uri) = settings.mongodb_uri() {
        let store_config = StoreConfig::new(uri).with_database(settings.database());
        let store = MongoStore::connect(&store_config)
            .await
            .map_err(std::io::Error::other)?;
        store.ensure_indexes().await.map_err(std::io::Error::other)?;
        health = health.with_store(Arc::new(store.clone()));
        config = config.with_store(store);
    }

    let health_state = web::Data::new(health);
    let server = create_server(health_state, config)?;
    info!(host, port, "House Hunter server running");
    server.await
}
