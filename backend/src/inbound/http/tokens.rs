//! Access token issuance.
//!
//! ```text
//! POST /jwt {"email":"a@x.com"}
//! ```

use actix_web::{HttpResponse, post, web};
use tracing::info;

use crate::domain::{Claim, strip_reserved_fields};
use crate::inbound::http::ApiResult;
use crate::inbound::http::documents::{TokenBody, TokenRequest};
use crate::inbound::http::schemas::{ErrorSchema, TokenRequestSchema, TokenSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email};

/// Issue a one-hour access token embedding the posted identity.
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = TokenRequestSchema,
    responses(
        (status = 200, description = "Signed access token", body = TokenSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "issueToken",
    security([])
)]
#[post("/jwt")]
pub async fn issue_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<HttpResponse> {
    let TokenRequest { email, extra } = payload.into_inner();
    let email = parse_email(&email, FieldName::new("email"))?;
    info!(email = %email, "issuing access token");
    let token = state
        .tokens
        .issue(Claim::new(email, strip_reserved_fields(extra)))?;
    Ok(HttpResponse::Ok().json(TokenBody {
        token: token.as_str(),
    }))
}
