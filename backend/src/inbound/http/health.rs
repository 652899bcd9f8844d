//! Health probes and the root banner.
//!
//! Readiness reflects two things: the listener has been bound, and the
//! document store (when one is configured) still answers a ping. Liveness
//! only says the process is serving requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, HttpResponseBuilder, get, http::header, web};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::StoreHealth;

/// Text served at `/`.
pub const BANNER: &str = "House Hunter server running";

const MEMORY_BACKEND: &str = "memory";

/// Readiness probe body.
#[derive(Debug, Serialize, ToSchema)]
pub struct Readiness {
    /// `ready`, `starting`, or `store_unavailable`.
    #[schema(example = "ready")]
    pub status: &'static str,
    /// Storage backend behind the repositories.
    #[schema(example = "mongodb")]
    pub storage: &'static str,
}

/// Startup flag plus the store checked on each readiness probe.
///
/// Without a store the repositories live in process memory and are always
/// reachable.
#[derive(Default)]
pub struct HealthState {
    listening: AtomicBool,
    store: Option<Arc<dyn StoreHealth>>,
}

impl HealthState {
    /// State for in-memory storage, not yet listening.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `store` on every readiness probe.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn StoreHealth>) -> Self {
        self.store = Some(store);
        self
    }

    /// Record that the listener is bound.
    pub fn mark_ready(&self) {
        self.listening.store(true, Ordering::Release);
    }

    fn storage(&self) -> &'static str {
        self.store
            .as_ref()
            .map_or(MEMORY_BACKEND, |store| store.backend())
    }

    /// Current readiness, pinging the store when one is attached.
    pub async fn readiness(&self) -> Readiness {
        let storage = self.storage();
        if !self.listening.load(Ordering::Acquire) {
            return Readiness {
                status: "starting",
                storage,
            };
        }
        let reachable = match &self.store {
            Some(store) => store.ping().await,
            None => Ok(()),
        };
        let status = match reachable {
            Ok(()) => "ready",
            Err(err) => {
                warn!(error = %err, "readiness probe failed");
                "store_unavailable"
            }
        };
        Readiness { status, storage }
    }
}

fn no_store(mut response: HttpResponseBuilder) -> HttpResponseBuilder {
    response.insert_header((header::CACHE_CONTROL, "no-store"));
    response
}

/// Readiness probe: 200 once listening with a reachable store, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Listening and the store answers", body = Readiness),
        (status = 503, description = "Starting, or the store is unreachable", body = Readiness)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let readiness = state.readiness().await;
    let builder = if readiness.status == "ready" {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    no_store(builder).json(readiness)
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Process is serving requests"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    no_store(HttpResponse::Ok()).finish()
}

/// Plain-text banner confirming the server is up.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Banner text", body = String))
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(BANNER)
}
