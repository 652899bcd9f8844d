//! Access token configuration parsing and validation.
//!
//! Resolves the signing secret and token lifetime from the loaded settings so
//! both are validated consistently and can be tested in isolation.

use chrono::TimeDelta;
use tracing::{info, warn};

use crate::domain::{ACCESS_TOKEN_TTL, TokenSecret};

/// Minimum secret length accepted in release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing or short secret and emit warnings.
    Debug,
    /// Release builds require an explicit secret of adequate length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use house_hunter::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Token settings derived from configuration.
#[derive(Debug)]
pub struct TokenSettings {
    /// HMAC signing secret.
    pub secret: TokenSecret,
    /// Lifetime of issued tokens.
    pub ttl: TimeDelta,
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TokenConfigError {
    /// No secret was configured.
    #[error("missing required setting: token_secret")]
    MissingSecret,
    /// The configured secret is too short for release builds.
    #[error("token_secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
    /// The lifetime is zero or too large to represent.
    #[error("invalid token_ttl_secs '{value}'; expected 1..=i64::MAX / 1000")]
    InvalidTtl { value: u64 },
}

/// Build token settings from the configured values and build mode.
///
/// # Examples
///
/// ```rust
/// use house_hunter::inbound::http::token_config::{BuildMode, token_settings};
///
/// let secret = "0123456789abcdef0123456789abcdef";
/// let settings = token_settings(Some(secret), Some(600), BuildMode::Release).unwrap();
/// assert_eq!(settings.ttl.num_seconds(), 600);
/// ```
pub fn token_settings(
    secret: Option<&str>,
    ttl_secs: Option<u64>,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let secret = resolve_secret(secret.filter(|value| !value.is_empty()), mode)?;
    let ttl = resolve_ttl(ttl_secs)?;
    info!(
        fingerprint = %secret.fingerprint(),
        ttl_secs = ttl.num_seconds(),
        "access token settings loaded"
    );
    Ok(TokenSettings { secret, ttl })
}

fn resolve_secret(value: Option<&str>, mode: BuildMode) -> Result<TokenSecret, TokenConfigError> {
    let Some(value) = value else {
        if mode.is_debug() {
            warn!("token_secret not set; using ephemeral secret (dev only)");
            return Ok(TokenSecret::generate());
        }
        return Err(TokenConfigError::MissingSecret);
    };

    let length = value.len();
    if length < TOKEN_SECRET_MIN_LEN {
        if !mode.is_debug() {
            return Err(TokenConfigError::SecretTooShort {
                length,
                min_len: TOKEN_SECRET_MIN_LEN,
            });
        }
        warn!(length, min_len = TOKEN_SECRET_MIN_LEN, "token_secret is short");
    }
    TokenSecret::new(value.as_bytes().to_vec()).map_err(|_| TokenConfigError::MissingSecret)
}

fn resolve_ttl(value: Option<u64>) -> Result<TimeDelta, TokenConfigError> {
    let Some(secs) = value else {
        return Ok(ACCESS_TOKEN_TTL);
    };
    i64::try_from(secs)
        .ok()
        .filter(|secs| *secs > 0)
        .and_then(TimeDelta::try_seconds)
        .ok_or(TokenConfigError::InvalidTtl { value: secs })
}
