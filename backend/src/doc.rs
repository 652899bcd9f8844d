//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every handler in the inbound HTTP layer, plus health probes
//! - **Schemas**: wrapper types from [`crate::inbound::http::schemas`] so the
//!   domain stays free of utoipa derives
//! - **Security**: the bearer token scheme checked by
//!   [`crate::middleware::RequireAuth`]
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::health::Readiness;
use crate::inbound::http::schemas::{
    BookingSchema, DeleteOutcomeSchema, ErrorCodeSchema, ErrorSchema, FilterInfoSchema,
    HouseSchema, InsertOutcomeSchema, LoginResultSchema, LoginSchema, LogoutSchema,
    NewBookingSchema, NewHouseSchema, NewUserSchema, TokenRequestSchema, TokenSchema,
    TotalHouseSchema, UnauthorizedSchema, UpdateOutcomeSchema, UserSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Access token issued by POST /jwt."))
            .build();
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "House Hunter API",
        description = "Rental listings, renter bookings, and token-gated account operations.",
        license(name = "ISC")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::tokens::issue_token,
        crate::inbound::http::users::add_new_user,
        crate::inbound::http::users::login_user,
        crate::inbound::http::users::log_out_user,
        crate::inbound::http::users::user_available,
        crate::inbound::http::houses::house_collection,
        crate::inbound::http::houses::total_house,
        crate::inbound::http::houses::single_house_data,
        crate::inbound::http::houses::own_houses,
        crate::inbound::http::houses::search_houses,
        crate::inbound::http::houses::filter_info,
        crate::inbound::http::houses::add_new_house,
        crate::inbound::http::houses::update_house_data,
        crate::inbound::http::houses::delete_house_data,
        crate::inbound::http::bookings::booking_house,
        crate::inbound::http::bookings::own_booked_houses,
        crate::inbound::http::bookings::remove_booked_house,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UnauthorizedSchema,
        InsertOutcomeSchema,
        UpdateOutcomeSchema,
        DeleteOutcomeSchema,
        UserSchema,
        NewUserSchema,
        LoginSchema,
        LogoutSchema,
        LoginResultSchema,
        TokenRequestSchema,
        TokenSchema,
        HouseSchema,
        NewHouseSchema,
        TotalHouseSchema,
        FilterInfoSchema,
        BookingSchema,
        NewBookingSchema,
        Readiness,
    )),
    tags(
        (name = "auth", description = "Access token issuance"),
        (name = "users", description = "Account registration and login state"),
        (name = "houses", description = "Rental listings"),
        (name = "bookings", description = "Renter bookings"),
        (name = "health", description = "Banner and health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI registration of schemas and security.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("User", "email")]
    #[case("House", "houseOwner")]
    #[case("Booking", "renter_email")]
    #[case("Booking", "houseId")]
    #[case("InsertOutcome", "insertedId")]
    #[case("Readiness", "storage")]
    fn schemas_expose_wire_field_names(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).unwrap_or_else(|| panic!("{name} schema"));

        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }

    #[rstest]
    #[case("/bookingHouse")]
    #[case("/houseCollection")]
    #[case("/jwt")]
    #[case("/userAvailable/{id}")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
