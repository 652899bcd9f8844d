//! Port for checking the backing store during readiness probes.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised when the store does not answer a health check.
    pub enum StoreHealthError {
        /// The store could not be reached.
        Unreachable { message: String } => "document store unreachable: {message}",
    }
}

/// Round-trip check against the store behind the repositories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Short backend name reported by the readiness probe.
    fn backend(&self) -> &'static str;

    /// Succeeds when the store answers.
    async fn ping(&self) -> Result<(), StoreHealthError>;
}
