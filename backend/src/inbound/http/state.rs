//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, BookingCommand, BookingQuery, BookingRepository, HouseCommand, HouseQuery,
    HouseRepository, UserRepository, UsersQuery,
};
use crate::domain::{AccountService, BookingService, HouseService, TokenService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub houses: Arc<dyn HouseCommand>,
    pub houses_query: Arc<dyn HouseQuery>,
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
}

impl HttpStatePorts {
    /// Wire the domain services over one repository per collection.
    pub fn from_repositories<U, H, B>(users: Arc<U>, houses: Arc<H>, bookings: Arc<B>) -> Self
    where
        U: UserRepository + 'static,
        H: HouseRepository + 'static,
        B: BookingRepository + 'static,
    {
        let accounts = Arc::new(AccountService::new(users));
        let houses = Arc::new(HouseService::new(houses));
        let bookings = Arc::new(BookingService::new(bookings));
        Self {
            accounts: accounts.clone(),
            users: accounts,
            houses: houses.clone(),
            houses_query: houses,
            bookings: bookings.clone(),
            bookings_query: bookings,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub houses: Arc<dyn HouseCommand>,
    pub houses_query: Arc<dyn HouseQuery>,
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub tokens: Arc<TokenService>,
}

impl HttpState {
    /// Construct state from the port bundle and the token service.
    ///
    /// The same token service must also be registered as
    /// `web::Data<TokenService>` for the auth gate; see
    /// [`crate::inbound::http::configure`].
    pub fn new(ports: HttpStatePorts, tokens: Arc<TokenService>) -> Self {
        let HttpStatePorts {
            accounts,
            users,
            houses,
            houses_query,
            bookings,
            bookings_query,
        } = ports;
        Self {
            accounts,
            users,
            houses,
            houses_query,
            bookings,
            bookings_query,
            tokens,
        }
    }
}
