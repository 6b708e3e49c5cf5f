//! Liveness endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
    /// "postgres" or "memory".
    store: &'static str,
    /// Size of the polled available-food snapshot.
    feed_posts: usize,
}

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: state.store_backend,
        feed_posts: state.feed.snapshot().len(),
    })
}
