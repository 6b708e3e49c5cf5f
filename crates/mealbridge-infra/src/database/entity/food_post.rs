//! `food_posts` entity.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use mealbridge_core::domain::FoodPost;
use mealbridge_core::error::StoreError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "food_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub food_id: Uuid,
    pub donor_id: String,
    pub donor_name: String,
    pub food_name: String,
    pub quantity: String,
    pub description: String,
    pub image_url: String,
    pub pickup_time: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: String,
    pub claimed_by: Option<String>,
    pub request_id: Option<Uuid>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for FoodPost {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            food_id: model.food_id,
            donor_id: model.donor_id,
            donor_name: model.donor_name,
            food_name: model.food_name,
            quantity: model.quantity,
            description: model.description,
            image_url: model.image_url,
            pickup_time: model.pickup_time,
            location: model.location,
            latitude: model.latitude,
            longitude: model.longitude,
            status: model.status.parse().map_err(StoreError::Query)?,
            claimed_by: model.claimed_by,
            request_id: model.request_id,
            created_at: model.created_at,
        })
    }
}

impl From<FoodPost> for ActiveModel {
    fn from(post: FoodPost) -> Self {
        Self {
            food_id: Set(post.food_id),
            donor_id: Set(post.donor_id),
            donor_name: Set(post.donor_name),
            food_name: Set(post.food_name),
            quantity: Set(post.quantity),
            description: Set(post.description),
            image_url: Set(post.image_url),
            pickup_time: Set(post.pickup_time),
            location: Set(post.location),
            latitude: Set(post.latitude),
            longitude: Set(post.longitude),
            status: Set(post.status.as_str().to_string()),
            claimed_by: Set(post.claimed_by),
            request_id: Set(post.request_id),
            created_at: Set(post.created_at),
        }
    }
}
