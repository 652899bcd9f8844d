//! Bearer token gate for protected routes.
//!
//! [`RequireAuth`] reads the `Authorization` header (`"<scheme> <token>"`),
//! verifies the token with the [`TokenService`] registered as app data, and
//! either forwards the request with the decoded [`Claim`] stored in the
//! request extensions or answers `401 {"error":true,"message":"unauthorized
//! access"}` without calling the wrapped service.
//!
//! The gate authenticates only. It does not compare the claim with the
//! resource being accessed.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{StatusCode, header::AUTHORIZATION};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{AuthError, Claim, Error as DomainError, TokenService};

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(json!({
            "error": true,
            "message": "unauthorized access",
        }))
    }
}

/// Token carried by an `Authorization` header value: the second
/// whitespace-separated part.
///
/// # Examples
/// ```
/// use house_hunter::middleware::auth::bearer_token;
///
/// assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
/// assert_eq!(bearer_token("Bearer"), None);
/// ```
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}

fn authenticate(req: &ServiceRequest, tokens: &TokenService) -> Result<Claim, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::Unauthorized)?;
    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .unwrap_or_default();
    tokens.verify(token)
}

/// Middleware factory guarding a route or scope.
///
/// # Examples
/// ```
/// use actix_web::{App, HttpResponse, web};
/// use house_hunter::middleware::RequireAuth;
///
/// let app = App::new().service(
///     web::resource("/private")
///         .wrap(RequireAuth)
///         .route(web::get().to(HttpResponse::Ok)),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireAuth;

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireAuth`].
pub struct RequireAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(tokens) = req.app_data::<web::Data<TokenService>>().cloned() else {
            error!("token service missing from app data");
            let err = DomainError::internal("token service not configured");
            return Box::pin(ready(Ok(req.error_response(err).map_into_right_body())));
        };

        match authenticate(&req, &tokens) {
            Ok(claim) => {
                req.extensions_mut().insert(claim);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(rejection) => {
                debug!(path = %req.path(), reason = %rejection, "request rejected by auth gate");
                Box::pin(ready(Ok(req
                    .error_response(rejection)
                    .map_into_right_body())))
            }
        }
    }
}

/// Claim attached by [`RequireAuth`], extracted in handlers.
///
/// Extraction fails with the standard 401 when the route is not gated.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedClaims(pub Claim);

impl FromRequest for AuthenticatedClaims {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Claim>()
                .cloned()
                .map(Self)
                .ok_or(AuthError::Unauthorized),
        )
    }
}
