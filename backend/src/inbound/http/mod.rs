//! HTTP inbound adapter exposing REST endpoints.

pub mod bookings;
pub mod documents;
pub mod error;
pub mod health;
pub mod houses;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod tokens;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;
use state::HttpState;

/// Register handler state, extractor settings, and every API route.
///
/// Health probes are not included; they need a
/// [`health::HealthState`] and are wired by the server.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use house_hunter::inbound::http::{configure, state::HttpState};
///
/// fn app(state: HttpState) {
///     let _ = App::new().configure(|cfg| configure(cfg, state));
/// }
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, state: HttpState) {
    let token_service = web::Data::from(state.tokens.clone());
    cfg.app_data(web::Data::new(state))
        .app_data(token_service)
        .app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(health::index)
        .service(tokens::issue_token)
        .service(users::add_new_user)
        .service(users::login_user)
        .service(users::log_out_user)
        .service(users::user_available)
        .service(houses::house_collection)
        .service(houses::total_house)
        .service(houses::single_house_data)
        .service(houses::own_houses)
        .service(houses::search_houses)
        .service(houses::filter_info)
        .service(houses::add_new_house)
        .service(houses::update_house_data)
        .service(houses::delete_house_data)
        .service(bookings::booking_house)
        .service(bookings::own_booked_houses)
        .service(bookings::remove_booked_house);
}
