//! Booking API handlers. Every route requires a bearer token.
//!
//! ```text
//! POST /bookingHouse {"renter_email":"a@x.com","houseId":"..."}
//! GET /ownBookedHouses/{email}
//! DELETE /removeBookedHouse/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use tracing::debug;

use crate::domain::{BookingAdmission, BookingDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::documents::{BookingBody, NewBookingRequest};
use crate::inbound::http::schemas::{
    BookingSchema, DeleteOutcomeSchema, ErrorSchema, InsertOutcomeSchema, NewBookingSchema,
    UnauthorizedSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_document_id, parse_email};
use crate::middleware::{AuthenticatedClaims, RequireAuth};

/// Book a house, subject to the one-per-house and two-per-renter limits.
#[utoipa::path(
    post,
    path = "/bookingHouse",
    request_body = NewBookingSchema,
    responses(
        (status = 200, description = "Insertion outcome, or the string \"You are already booked this house\" / \"You are already booked maximum house\"", body = InsertOutcomeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = UnauthorizedSchema)
    ),
    tags = ["bookings"],
    operation_id = "bookingHouse",
    security(("BearerToken" = []))
)]
#[post("/bookingHouse", wrap = "RequireAuth")]
pub async fn booking_house(
    state: web::Data<HttpState>,
    claims: AuthenticatedClaims,
    payload: web::Json<NewBookingRequest>,
) -> ApiResult<HttpResponse> {
    let NewBookingRequest {
        renter_email,
        house_id,
        attributes,
    } = payload.into_inner();
    let renter = parse_email(&renter_email, FieldName::new("renter_email"))?;
    let house = parse_document_id(&house_id, FieldName::new("houseId"))?;
    debug!(actor = %claims.0.email(), renter = %renter, house = %house, "booking house");

    let admission = state
        .bookings
        .admit(BookingDraft::new(renter, house, attributes))
        .await?;
    Ok(match admission {
        BookingAdmission::Admitted(inserted) => HttpResponse::Ok().json(inserted),
        BookingAdmission::Rejected(rejection) => HttpResponse::Ok().json(rejection.message()),
    })
}

/// Bookings held by `email`.
#[utoipa::path(
    get,
    path = "/ownBookedHouses/{email}",
    params(("email" = String, Path, description = "Renter's email address")),
    responses(
        (status = 200, description = "Renter's bookings", body = [BookingSchema]),
        (status = 401, description = "Missing or invalid token", body = UnauthorizedSchema)
    ),
    tags = ["bookings"],
    operation_id = "ownBookedHouses",
    security(("BearerToken" = []))
)]
#[get("/ownBookedHouses/{email}", wrap = "RequireAuth")]
pub async fn own_booked_houses(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let renter = parse_email(&path.into_inner(), FieldName::new("email"))?;
    let bookings = state.bookings_query.list_by_renter(&renter).await?;
    let body: Vec<_> = bookings.iter().map(BookingBody::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Remove a booking.
#[utoipa::path(
    delete,
    path = "/removeBookedHouse/{id}",
    params(("id" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Delete outcome", body = DeleteOutcomeSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = UnauthorizedSchema)
    ),
    tags = ["bookings"],
    operation_id = "removeBookedHouse",
    security(("BearerToken" = []))
)]
#[delete("/removeBookedHouse/{id}", wrap = "RequireAuth")]
pub async fn remove_booked_house(
    state: web::Data<HttpState>,
    claims: AuthenticatedClaims,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_document_id(&path.into_inner(), FieldName::new("id"))?;
    debug!(actor = %claims.0.email(), %id, "removing booking");
    let outcome = state.bookings.remove(&id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{
        Attributes, Booking, BookingRejection, DeleteOutcome, DocumentId, Error, InsertOutcome,
        TokenService,
    };
    use crate::inbound::http::test_utils::{PortMocks, bearer, test_app, test_tokens};

    #[fixture]
    fn tokens() -> Arc<TokenService> {
        test_tokens()
    }

    async fn send(
        mocks: PortMocks,
        tokens: Arc<TokenService>,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(mocks.into_state(tokens))).await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        (status, actix_test::read_body_json(response).await)
    }

    fn booking_request(tokens: &TokenService) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri("/bookingHouse")
            .insert_header(bearer(tokens, "a@x.com"))
            .set_json(json!({ "renter_email": "a@x.com", "houseId": "H1", "date": "2026-01-01" }))
    }

    #[rstest]
    #[actix_web::test]
    async fn admitted_booking_returns_insert_outcome(tokens: Arc<TokenService>) {
        let mut mocks = PortMocks::default();
        mocks
            .bookings
            .expect_admit()
            .withf(|draft| {
                draft.renter_email().as_ref() == "a@x.com"
                    && draft.house_id().as_ref() == "H1"
                    && draft.attributes().get("date") == Some(&json!("2026-01-01"))
            })
            .times(1)
            .return_once(|_| {
                Ok(BookingAdmission::Admitted(InsertOutcome::acknowledged(
                    DocumentId::new("b1").expect("valid id"),
                )))
            });

        let request = booking_request(&tokens);
        let (status, body) = send(mocks, tokens, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "acknowledged": true, "insertedId": "b1" }));
    }

    #[rstest]
    #[case(BookingRejection::AlreadyBooked, "You are already booked this house")]
    #[case(BookingRejection::QuotaExceeded, "You are already booked maximum house")]
    #[actix_web::test]
    async fn rejections_are_successful_strings(
        tokens: Arc<TokenService>,
        #[case] rejection: BookingRejection,
        #[case] message: &str,
    ) {
        let mut mocks = PortMocks::default();
        mocks
            .bookings
            .expect_admit()
            .return_once(move |_| Ok(BookingAdmission::Rejected(rejection)));

        let request = booking_request(&tokens);
        let (status, body) = send(mocks, tokens, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(message));
    }

    #[rstest]
    #[actix_web::test]
    async fn booking_without_token_never_admits(tokens: Arc<TokenService>) {
        let request = actix_test::TestRequest::post()
            .uri("/bookingHouse")
            .set_json(json!({ "renter_email": "a@x.com", "houseId": "H1" }));
        let (status, body) = send(PortMocks::default(), tokens, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": true, "message": "unauthorized access" }));
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_house_id_is_a_bad_request(tokens: Arc<TokenService>) {
        let mut mocks = PortMocks::default();
        mocks
            .bookings
            .expect_admit()
            .return_once(|_| Err(Error::invalid_request("invalid house id: H1")));

        let request = booking_request(&tokens);
        let (status, _) = send(mocks, tokens, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn own_bookings_are_listed(tokens: Arc<TokenService>) {
        let mut mocks = PortMocks::default();
        mocks
            .bookings_query
            .expect_list_by_renter()
            .withf(|renter| renter.as_ref() == "a@x.com")
            .return_once(|renter| {
                Ok(vec![Booking::new(
                    DocumentId::new("b1").expect("valid id"),
                    renter.clone(),
                    DocumentId::new("H1").expect("valid id"),
                    Attributes::new(),
                )])
            });

        let request = actix_test::TestRequest::get()
            .uri("/ownBookedHouses/a@x.com")
            .insert_header(bearer(&tokens, "a@x.com"));
        let (status, body) = send(mocks, tokens, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{ "_id": "b1", "renter_email": "a@x.com", "houseId": "H1" }])
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn remove_returns_delete_outcome(tokens: Arc<TokenService>) {
        let mut mocks = PortMocks::default();
        mocks
            .bookings
            .expect_remove()
            .withf(|id| id.as_ref() == "b1")
            .return_once(|_| {
                Ok(DeleteOutcome {
                    acknowledged: true,
                    deleted_count: 1,
                })
            });

        let request = actix_test::TestRequest::delete()
            .uri("/removeBookedHouse/b1")
            .insert_header(bearer(&tokens, "a@x.com"));
        let (status, body) = send(mocks, tokens, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("deletedCount").and_then(Value::as_u64), Some(1));
    }
}
