//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as tracing and authentication.

pub mod auth;
pub mod trace;

pub use auth::{AuthenticatedClaims, RequireAuth};
pub use trace::Trace;
