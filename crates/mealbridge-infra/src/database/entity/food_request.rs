//! `food_requests` entity.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use mealbridge_core::domain::FoodRequest;
use mealbridge_core::error::StoreError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "food_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub food_name: String,
    pub quantity: String,
    pub location: String,
    pub urgency: String,
    pub status: String,
    pub matched_food_id: Option<Uuid>,
    pub assigned_ngo_id: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for FoodRequest {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            food_name: model.food_name,
            quantity: model.quantity,
            location: model.location,
            urgency: model.urgency.parse().map_err(StoreError::Query)?,
            status: model.status.parse().map_err(StoreError::Query)?,
            matched_food_id: model.matched_food_id,
            assigned_ngo_id: model.assigned_ngo_id,
            created_at: model.created_at,
        })
    }
}

impl From<FoodRequest> for ActiveModel {
    fn from(request: FoodRequest) -> Self {
        Self {
            id: Set(request.id),
            user_id: Set(request.user_id),
            food_name: Set(request.food_name),
            quantity: Set(request.quantity),
            location: Set(request.location),
            urgency: Set(request.urgency.as_str().to_string()),
            status: Set(request.status.as_str().to_string()),
            matched_food_id: Set(request.matched_food_id),
            assigned_ngo_id: Set(request.assigned_ngo_id),
            created_at: Set(request.created_at),
        }
    }
}
