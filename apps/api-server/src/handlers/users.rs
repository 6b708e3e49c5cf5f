//! User profile handlers.
//!
//! Sign-up and sign-in happen at the auth provider; these routes manage
//! the profile row keyed by the provider-issued user id.

use actix_web::{HttpResponse, web};

use mealbridge_core::domain::{User, UserType};
use mealbridge_shared::dto::{RegisterProfileRequest, SavePushTokenRequest, SetUserTypeRequest};
use mealbridge_shared::response::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/users - create the profile row after provider sign-up.
pub async fn register(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<RegisterProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let user = User::new(identity.user_id, req.name, req.email, req.phone);
    state.accounts.register_profile(user.clone()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(user)))
}

/// GET /api/users/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.accounts.user(&identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user)))
}

/// PUT /api/users/me/type - pick a role during onboarding.
pub async fn set_type(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<SetUserTypeRequest>,
) -> AppResult<HttpResponse> {
    let user_type: UserType = body
        .user_type
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    state
        .accounts
        .set_user_type(&identity.user_id, user_type)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}

/// PUT /api/users/me/push-token
pub async fn save_push_token(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<SavePushTokenRequest>,
) -> AppResult<HttpResponse> {
    state
        .accounts
        .save_push_token(&identity.user_id, &body.token)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(())))
}
