//! Food post handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use mealbridge_core::domain::{FoodStatus, NewFoodPost};
use mealbridge_core::view::{self, DashboardCounts};
use mealbridge_shared::dto::{AdvanceStatusRequest, PostFoodRequest, PostFoodResponse};
use mealbridge_shared::response::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// POST /api/food
pub async fn post_food(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostFoodRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.food_name.trim().is_empty() {
        return Err(AppError::BadRequest("food_name must not be empty".to_string()));
    }

    let fields = NewFoodPost {
        food_name: req.food_name,
        quantity: req.quantity,
        description: req.description,
        image_url: req.image_url,
        pickup_time: req.pickup_time,
        location: req.location,
        latitude: req.latitude,
        longitude: req.longitude,
    };

    let food_id = state.lifecycle.post_food(&identity.user_id, fields).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(PostFoodResponse { food_id })))
}

/// GET /api/food/available - live read, newest first.
pub async fn available(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.lifecycle.available_food().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/food/feed?q= - cached snapshot from the background poller.
///
/// Bounded staleness; the optional query is an in-memory filter over the
/// snapshot, not a store query.
pub async fn feed(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let snapshot = state.feed.snapshot();
    let filtered: Vec<_> = view::filter_posts(&snapshot, &query.q)
        .into_iter()
        .cloned()
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(filtered)))
}

/// GET /api/food/mine - the caller's own donations.
pub async fn mine(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.lifecycle.my_donations(&identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/food/claimed - posts the caller has claimed.
pub async fn claimed(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.lifecycle.my_claimed(&identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/food/inventory - the caller's undelivered NGO claims.
pub async fn inventory(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.lifecycle.ngo_inventory(&identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/food/search?q= - store-side name search.
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.lifecycle.search_food(&query.q).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/food/dashboard - counts over the caller's own posts.
pub async fn dashboard(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.lifecycle.my_donations(&identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DashboardCounts::from_posts(&posts))))
}

/// POST /api/food/{id}/claim
pub async fn claim(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .lifecycle
        .claim_food(path.into_inner(), &identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}

/// POST /api/food/{id}/ngo-claim
pub async fn ngo_claim(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .lifecycle
        .claim_food_as_ngo(path.into_inner(), &identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}

/// POST /api/food/{id}/status - advance along the NGO pipeline.
pub async fn advance_status(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<AdvanceStatusRequest>,
) -> AppResult<HttpResponse> {
    let status: FoodStatus = body
        .status
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    state.lifecycle.advance_status(path.into_inner(), status).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}

/// POST /api/food/{id}/complete
pub async fn complete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.lifecycle.mark_completed(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}

/// DELETE /api/food/{id}
///
/// Ownership is enforced store-side; a non-owner's delete affects zero
/// rows and still reports success.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .lifecycle
        .delete_food(path.into_inner(), &identity.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
