//! Food request handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use mealbridge_core::domain::{NewFoodRequest, Urgency};
use mealbridge_shared::dto::{CreateRequestRequest, CreateRequestResponse, MatchRequest};
use mealbridge_shared::response::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/requests
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateRequestRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let urgency: Urgency = req
        .urgency
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    let fields = NewFoodRequest {
        food_name: req.food_name,
        quantity: req.quantity,
        location: req.location,
        urgency,
    };

    let request_id = state
        .matching
        .create_request(&identity.user_id, fields)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(CreateRequestResponse { request_id })))
}

/// GET /api/requests/mine
pub async fn mine(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let requests = state.matching.user_requests(&identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(requests)))
}

/// GET /api/requests/open - unmet need, for NGOs browsing.
pub async fn open(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let requests = state.matching.open_requests().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(requests)))
}

/// POST /api/requests/{id}/match - link a request to the post fulfilling it.
pub async fn match_food(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<MatchRequest>,
) -> AppResult<HttpResponse> {
    state
        .matching
        .match_request_with_food(path.into_inner(), body.food_id, &identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}
