//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, web};
use mockable::DefaultClock;

use crate::domain::ports::{
    MockAccountCommand, MockBookingCommand, MockBookingQuery, MockHouseCommand, MockHouseQuery,
    MockUsersQuery,
};
use crate::domain::{ACCESS_TOKEN_TTL, Attributes, Claim, Email, TokenSecret, TokenService};
use crate::inbound::http::configure;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mocked driving ports. Ports a test leaves untouched panic when called.
#[derive(Default)]
pub struct PortMocks {
    pub accounts: MockAccountCommand,
    pub users: MockUsersQuery,
    pub houses: MockHouseCommand,
    pub houses_query: MockHouseQuery,
    pub bookings: MockBookingCommand,
    pub bookings_query: MockBookingQuery,
}

impl PortMocks {
    /// Bundle the mocks into handler state sharing `tokens`.
    pub fn into_state(self, tokens: Arc<TokenService>) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                accounts: Arc::new(self.accounts),
                users: Arc::new(self.users),
                houses: Arc::new(self.houses),
                houses_query: Arc::new(self.houses_query),
                bookings: Arc::new(self.bookings),
                bookings_query: Arc::new(self.bookings_query),
            },
            tokens,
        )
    }
}

/// Token service with a fixed secret and the system clock.
pub fn test_tokens() -> Arc<TokenService> {
    let secret = TokenSecret::new(b"handler-test-secret".to_vec()).expect("secret");
    Arc::new(TokenService::new(
        &secret,
        ACCESS_TOKEN_TTL,
        Arc::new(DefaultClock),
    ))
}

/// `Authorization` header carrying a fresh token for `email`.
pub fn bearer(tokens: &TokenService, email: &str) -> (actix_web::http::header::HeaderName, String) {
    let claim = Claim::new(Email::new(email).expect("valid email"), Attributes::new());
    let token = tokens.issue(claim).expect("token issued");
    (AUTHORIZATION, format!("Bearer {}", token.as_str()))
}

/// Application with every House Hunter route registered against `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().configure(|cfg: &mut web::ServiceConfig| configure(cfg, state))
}
