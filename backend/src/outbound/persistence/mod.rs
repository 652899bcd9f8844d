//! MongoDB persistence adapters.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by MongoDB via the official `mongodb` driver.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between BSON documents
//!   and domain records. No business logic resides here.
//! - **Internal conversion**: document decoding (`documents.rs`) and driver
//!   error mapping are implementation details, never exposed to the domain.
//! - **Shared client**: one [`MongoStore`] is connected at startup and
//!   cloned into each repository; the driver pools connections internally.
//! - **Strongly typed errors**: driver failures map onto each port's error
//!   enum. A unique-index violation on bookings maps to `Duplicate`.
//!
//! # Example
//!
//! ```ignore
//! use house_hunter::outbound::persistence::{MongoHouseRepository, MongoStore, StoreConfig};
//!
//! let store = MongoStore::connect(&StoreConfig::new("mongodb://localhost:27017")).await?;
//! store.ensure_indexes().await?;
//! let houses = MongoHouseRepository::new(store.clone());
//! ```

mod documents;
mod error_mapping;
mod mongo_booking_repository;
mod mongo_house_repository;
mod mongo_user_repository;
mod store;

pub use mongo_booking_repository::MongoBookingRepository;
pub use mongo_house_repository::MongoHouseRepository;
pub use mongo_user_repository::MongoUserRepository;
pub use store::{MongoStore, StoreConfig, StoreError};
