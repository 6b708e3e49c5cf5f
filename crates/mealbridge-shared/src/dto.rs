//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/food`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFoodRequest {
    pub food_name: String,
    pub quantity: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub pickup_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

/// Response to a successful food post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFoodResponse {
    pub food_id: Uuid,
}

/// Body of `POST /api/food/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceStatusRequest {
    /// Target status, wire form (e.g. "in_transit").
    pub status: String,
}

/// Body of `POST /api/requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestRequest {
    pub food_name: String,
    pub quantity: String,
    pub location: String,
    /// "Normal", "Urgent", or "Immediate".
    pub urgency: String,
}

/// Response to a successful request creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestResponse {
    pub request_id: Uuid,
}

/// Body of `POST /api/requests/{id}/match`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub food_id: Uuid,
}

/// Body of `POST /api/users` - profile registration after sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Body of `PUT /api/users/me/type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetUserTypeRequest {
    /// "donor", "recipient", or "ngo".
    pub user_type: String,
}

/// Body of `PUT /api/users/me/push-token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePushTokenRequest {
    pub token: String,
}
