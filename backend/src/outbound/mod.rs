//! Outbound adapters implementing the domain repository ports.
//!
//! - **persistence**: MongoDB-backed repositories
//! - **memory**: in-process repositories used when no MongoDB URI is set
//!
//! Adapters are thin translators between domain records and the storage
//! representation. They contain no business logic.

pub mod memory;
pub mod persistence;
