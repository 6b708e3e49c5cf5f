//! `users` entity.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use mealbridge_core::domain::User;
use mealbridge_core::error::StoreError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: Option<String>,
    pub food_donated: i32,
    pub food_received: i32,
    pub profile_image_url: String,
    pub fcm_token: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let user_type = model
            .user_type
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(StoreError::Query)?;

        // The columns are signed ints; the domain counters are not.
        let food_donated = u32::try_from(model.food_donated)
            .map_err(|_| StoreError::Query(format!("negative food_donated for {}", model.user_id)))?;
        let food_received = u32::try_from(model.food_received)
            .map_err(|_| StoreError::Query(format!("negative food_received for {}", model.user_id)))?;

        Ok(Self {
            user_id: model.user_id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            user_type,
            food_donated,
            food_received,
            profile_image_url: model.profile_image_url,
            fcm_token: model.fcm_token,
            created_at: model.created_at,
        })
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        Self {
            user_id: Set(user.user_id),
            name: Set(user.name),
            email: Set(user.email),
            phone: Set(user.phone),
            user_type: Set(user.user_type.map(|t| t.as_str().to_string())),
            food_donated: Set(user.food_donated as i32),
            food_received: Set(user.food_received as i32),
            profile_image_url: Set(user.profile_image_url),
            fcm_token: Set(user.fcm_token),
            created_at: Set(user.created_at),
        }
    }
}
