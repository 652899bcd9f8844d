//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `HOUSE_HUNTER_*` environment variables, CLI flags, or a
//! configuration file. Every field is optional; accessors apply defaults.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::StoreConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOUSE_HUNTER")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// MongoDB connection string; in-memory storage is used when absent.
    pub mongodb_uri: Option<String>,
    /// Database holding the `users`, `houses`, and `bookings` collections.
    pub database: Option<String>,
    /// HMAC secret for access tokens.
    pub token_secret: Option<String>,
    /// Access token lifetime in seconds.
    pub token_ttl_secs: Option<u64>,
}

impl AppSettings {
    /// Bind address as `(host, port)`.
    pub fn bind_addr(&self) -> (&str, u16) {
        (
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured MongoDB URI, ignoring blank values.
    pub fn mongodb_uri(&self) -> Option<&str> {
        self.mongodb_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
    }

    /// Database name, falling back to the default.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(StoreConfig::DEFAULT_DATABASE)
    }
}
