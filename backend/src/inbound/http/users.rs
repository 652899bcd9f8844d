//! Account API handlers.
//!
//! ```text
//! POST /addNewUser {"email":"a@x.com","password":"pw",...}
//! POST /loginUser {"email":"a@x.com","password":"pw"}
//! POST /logOutUser {"email":"a@x.com"}
//! GET /userAvailable/a@x.com
//! ```
//!
//! Rejections (duplicate registration, unknown user, wrong password) are
//! answered with `200` and a JSON string, which existing clients rely on.

use actix_web::{HttpResponse, get, post, web};
use serde_json::json;

use crate::domain::ports::{LoginOutcome, RegistrationOutcome};
use crate::domain::{
    Error, LoginCredentials, LoginValidationError, NewUser, strip_reserved_fields,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::documents::{
    LoginBody, LoginRequest, LogoutRequest, RegisterRequest, UserBody,
};
use crate::inbound::http::schemas::{
    ErrorSchema, InsertOutcomeSchema, LoginResultSchema, LoginSchema, LogoutSchema, NewUserSchema,
    UpdateOutcomeSchema, UserSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email};

/// Register a user unless the email is taken.
#[utoipa::path(
    post,
    path = "/addNewUser",
    request_body = NewUserSchema,
    responses(
        (status = 200, description = "Insertion outcome, or the string \"The user already registered\"", body = InsertOutcomeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "addNewUser",
    security([])
)]
#[post("/addNewUser")]
pub async fn add_new_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        password,
        logged_in,
        profile,
    } = payload.into_inner();
    let email = parse_email(&email, FieldName::new("email"))?;
    let user = NewUser::new(email, password, strip_reserved_fields(profile))
        .with_logged_in(logged_in.unwrap_or(false));

    let outcome = state.accounts.register(user).await?;
    Ok(match outcome {
        RegistrationOutcome::Registered(inserted) => HttpResponse::Ok().json(inserted),
        rejected @ RegistrationOutcome::AlreadyRegistered => {
            HttpResponse::Ok().json(rejected.rejection_message())
        }
    })
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
    }
}

/// Check credentials and mark the user logged in.
#[utoipa::path(
    post,
    path = "/loginUser",
    request_body = LoginSchema,
    responses(
        (status = 200, description = "`{user, result}`, or the string \"User not found\" / \"Password does not match\"", body = LoginResultSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "loginUser",
    security([])
)]
#[post("/loginUser")]
pub async fn login_user(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(map_login_validation_error)?;

    let outcome = state.accounts.login(credentials).await?;
    Ok(match &outcome {
        LoginOutcome::LoggedIn { user, result } => HttpResponse::Ok().json(LoginBody {
            user: UserBody::from(user),
            result,
        }),
        LoginOutcome::UserNotFound | LoginOutcome::PasswordMismatch => {
            HttpResponse::Ok().json(outcome.rejection_message())
        }
    })
}

/// Mark the user logged out; succeeds even when no user matches.
#[utoipa::path(
    post,
    path = "/logOutUser",
    request_body = LogoutSchema,
    responses(
        (status = 200, description = "Update outcome", body = UpdateOutcomeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "logOutUser",
    security([])
)]
#[post("/logOutUser")]
pub async fn log_out_user(
    state: web::Data<HttpState>,
    payload: web::Json<LogoutRequest>,
) -> ApiResult<HttpResponse> {
    let email = parse_email(&payload.email, FieldName::new("email"))?;
    let outcome = state.accounts.logout(&email).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Look up a user by email; `null` when absent.
#[utoipa::path(
    get,
    path = "/userAvailable/{id}",
    params(("id" = String, Path, description = "Email address of the user")),
    responses(
        (status = 200, description = "User or null", body = Option<UserSchema>),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userAvailable",
    security([])
)]
#[get("/userAvailable/{id}")]
pub async fn user_available(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let email = parse_email(&path.into_inner(), FieldName::new("id"))?;
    let user = state.users.find_user(&email).await?;
    Ok(HttpResponse::Ok().json(user.as_ref().map(UserBody::from)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
