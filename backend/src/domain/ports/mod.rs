//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by the store adapters under
//! `outbound`; driving ports (`*Command`, `*Query`) are implemented by the
//! domain services and called by the HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod booking_command;
mod booking_query;
mod booking_repository;
mod house_command;
mod house_query;
mod house_repository;
mod store_health;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, LoginOutcome, RegistrationOutcome};
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::BookingCommand;
#[cfg(test)]
pub use booking_query::MockBookingQuery;
pub use booking_query::BookingQuery;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use house_command::MockHouseCommand;
pub use house_command::HouseCommand;
#[cfg(test)]
pub use house_query::MockHouseQuery;
pub use house_query::HouseQuery;
#[cfg(test)]
pub use house_repository::MockHouseRepository;
pub use house_repository::{HouseRepository, HouseRepositoryError};
#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::{StoreHealth, StoreHealthError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
