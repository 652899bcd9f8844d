//! Access token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying a [`Claim`] plus `iat`/`exp` timestamps.
//! Expiry is checked against the injected [`Clock`] rather than the system
//! time so verification stays a pure function of token, time, and secret.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use super::{Attributes, Email, Error};

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL: TimeDelta = TimeDelta::hours(1);

/// Claim keys managed by the token service itself.
const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];
const GENERATED_SECRET_LEN: usize = 64;
const FINGERPRINT_BYTES: usize = 8;

/// Authentication failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Signature mismatch, malformed payload, or expired token.
    #[error("access token is invalid or expired")]
    Invalid,
    /// No usable credentials were presented.
    #[error("unauthorized access")]
    Unauthorized,
}

/// Identity payload embedded in a token.
///
/// # Examples
/// ```
/// use house_hunter::domain::{Attributes, Claim, Email};
///
/// let claim = Claim::new(Email::new("a@x.com").unwrap(), Attributes::new());
/// assert_eq!(claim.email().as_ref(), "a@x.com");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    email: Email,
    #[serde(flatten)]
    extra: Attributes,
}

impl Claim {
    /// Build a claim. `iat`/`exp` keys in `extra` are discarded.
    pub fn new(email: Email, mut extra: Attributes) -> Self {
        extra.remove("email");
        for key in RESERVED_CLAIMS {
            extra.remove(key);
        }
        Self { email, extra }
    }

    /// Identity the token was issued for.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Any further identity fields supplied at issuance.
    pub fn extra(&self) -> &Attributes {
        &self.extra
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    #[serde(flatten)]
    claim: Claim,
    iat: i64,
    exp: i64,
}

/// Signed token string handed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// The encoded token.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validation errors for [`TokenSecret`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenSecretError {
    /// The secret had no bytes.
    #[error("token secret must not be empty")]
    Empty,
}

/// Process-wide signing secret.
#[derive(Clone)]
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    /// Wrap secret material.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TokenSecretError> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(TokenSecretError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Random secret for development runs. Tokens do not survive restarts.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new(vec![0_u8; GENERATED_SECRET_LEN]);
        rand::thread_rng().fill_bytes(bytes.as_mut_slice());
        Self(bytes)
    }

    #[cfg(test)]
    pub(crate) fn byte_len(&self) -> usize {
        self.0.len()
    }

    /// Truncated SHA-256 of the secret as 16 hex characters, for logs.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_slice());
        hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
    }
}

impl std::fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TokenSecret")
            .field(&self.fingerprint())
            .finish()
    }
}

/// Issues and verifies access tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a service signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: &TokenSecret, ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.0.as_slice()),
            decoding: DecodingKey::from_secret(secret.0.as_slice()),
            ttl,
            clock,
        }
    }

    /// Sign `claim` with `exp` one TTL after the current time.
    pub fn issue(&self, claim: Claim) -> Result<AccessToken, Error> {
        let iat = self.clock.utc().timestamp();
        let exp = iat.saturating_add(self.ttl.num_seconds());
        debug!(email = %claim.email(), exp, "issuing access token");
        let wire = WireClaims { claim, iat, exp };
        encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map(AccessToken)
            .map_err(|err| Error::internal(format!("failed to sign access token: {err}")))
    }

    /// Decode `token`, checking signature, shape, and expiry.
    pub fn verify(&self, token: &str) -> Result<Claim, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is judged against the injected clock below.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        let data = decode::<WireClaims>(token, &self.decoding, &validation).map_err(|err| {
            debug!(error = %err, "access token rejected");
            AuthError::Invalid
        })?;
        let now = self.clock.utc().timestamp();
        if now >= data.claims.exp {
            debug!(exp = data.claims.exp, now, "access token expired");
            return Err(AuthError::Invalid);
        }
        Ok(data.claims.claim)
    }
}
