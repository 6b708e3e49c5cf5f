//! PostgreSQL implementations of the store ports.
//!
//! Updates are `UPDATE ... SET` statements filtered by the row key:
//! unconditional overwrites, serialized only by the database's own
//! row-level write ordering (last write wins).

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use mealbridge_core::domain::{FoodPost, FoodRequest, FoodStatus, RequestStatus, User, UserType};
use mealbridge_core::error::StoreError;
use mealbridge_core::ports::{
    PostPatch, PostStore, RequestPatch, RequestStore, UserPatch, UserStore,
};

use super::entity::food_post::{self, Entity as PostEntity};
use super::entity::food_request::{self, Entity as RequestEntity};
use super::entity::user::{self, Entity as UserEntity};

/// One store over all three tables, sharing a connection pool.
pub struct PgStore {
    db: DbConn,
}

impl PgStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_err(err: DbErr) -> StoreError {
    StoreError::Query(err.to_string())
}

fn insert_err(err: DbErr) -> StoreError {
    let msg = err.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        StoreError::Constraint(msg)
    } else {
        StoreError::Query(msg)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert(&self, u: User) -> Result<(), StoreError> {
        UserEntity::insert(user::ActiveModel::from(u))
            .exec(&self.db)
            .await
            .map_err(insert_err)?;
        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        UserEntity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(query_err)?
            .map(User::try_from)
            .transpose()
    }

    async fn apply(&self, user_id: &str, patch: UserPatch) -> Result<u64, StoreError> {
        let mut update =
            UserEntity::update_many().filter(user::Column::UserId.eq(user_id.to_string()));
        let mut touched = false;

        if let Some(user_type) = patch.user_type {
            update = update.col_expr(user::Column::UserType, Expr::value(user_type.as_str()));
            touched = true;
        }
        if let Some(n) = patch.food_donated {
            update = update.col_expr(user::Column::FoodDonated, Expr::value(n as i32));
            touched = true;
        }
        if let Some(n) = patch.food_received {
            update = update.col_expr(user::Column::FoodReceived, Expr::value(n as i32));
            touched = true;
        }
        if let Some(token) = patch.fcm_token {
            update = update.col_expr(user::Column::FcmToken, Expr::value(token));
            touched = true;
        }
        if !touched {
            return Ok(0);
        }

        let result = update.exec(&self.db).await.map_err(query_err)?;
        Ok(result.rows_affected)
    }

    async fn recipient_push_tokens(&self) -> Result<Vec<String>, StoreError> {
        let rows = UserEntity::find()
            .filter(user::Column::UserType.eq(UserType::Recipient.as_str()))
            .filter(user::Column::FcmToken.is_not_null())
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().filter_map(|u| u.fcm_token).collect())
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn insert(&self, post: FoodPost) -> Result<(), StoreError> {
        PostEntity::insert(food_post::ActiveModel::from(post))
            .exec(&self.db)
            .await
            .map_err(insert_err)?;
        Ok(())
    }

    async fn find(&self, food_id: Uuid) -> Result<Option<FoodPost>, StoreError> {
        PostEntity::find_by_id(food_id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .map(FoodPost::try_from)
            .transpose()
    }

    async fn list_by_status(&self, status: FoodStatus) -> Result<Vec<FoodPost>, StoreError> {
        let rows = PostEntity::find()
            .filter(food_post::Column::Status.eq(status.as_str()))
            .order_by_desc(food_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(FoodPost::try_from).collect()
    }

    async fn list_by_donor(&self, donor_id: &str) -> Result<Vec<FoodPost>, StoreError> {
        let rows = PostEntity::find()
            .filter(food_post::Column::DonorId.eq(donor_id.to_string()))
            .order_by_desc(food_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(FoodPost::try_from).collect()
    }

    async fn list_claimed_by(&self, user_id: &str) -> Result<Vec<FoodPost>, StoreError> {
        let rows = PostEntity::find()
            .filter(food_post::Column::ClaimedBy.eq(user_id.to_string()))
            .order_by_desc(food_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(FoodPost::try_from).collect()
    }

    async fn list_ngo_inventory(&self, ngo_id: &str) -> Result<Vec<FoodPost>, StoreError> {
        let rows = PostEntity::find()
            .filter(food_post::Column::ClaimedBy.eq(ngo_id.to_string()))
            .filter(food_post::Column::Status.is_in([
                FoodStatus::ClaimedByNgo.as_str(),
                FoodStatus::InTransit.as_str(),
            ]))
            .order_by_desc(food_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(FoodPost::try_from).collect()
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<FoodPost>, StoreError> {
        let rows = PostEntity::find()
            .filter(Expr::col(food_post::Column::FoodName).ilike(format!("%{query}%")))
            .order_by_desc(food_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(FoodPost::try_from).collect()
    }

    async fn list_by_location(&self, location: &str) -> Result<Vec<FoodPost>, StoreError> {
        let rows = PostEntity::find()
            .filter(food_post::Column::Location.eq(location.to_string()))
            .order_by_desc(food_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(FoodPost::try_from).collect()
    }

    async fn apply(&self, food_id: Uuid, patch: PostPatch) -> Result<u64, StoreError> {
        let mut update = PostEntity::update_many().filter(food_post::Column::FoodId.eq(food_id));
        let mut touched = false;

        if let Some(status) = patch.status {
            update = update.col_expr(food_post::Column::Status, Expr::value(status.as_str()));
            touched = true;
        }
        if let Some(claimed_by) = patch.claimed_by {
            update = update.col_expr(food_post::Column::ClaimedBy, Expr::value(claimed_by));
            touched = true;
        }
        if let Some(request_id) = patch.request_id {
            update = update.col_expr(food_post::Column::RequestId, Expr::value(request_id));
            touched = true;
        }
        if !touched {
            return Ok(0);
        }

        let result = update.exec(&self.db).await.map_err(query_err)?;
        Ok(result.rows_affected)
    }

    async fn delete_owned(&self, food_id: Uuid, donor_id: &str) -> Result<u64, StoreError> {
        let result = PostEntity::delete_many()
            .filter(food_post::Column::FoodId.eq(food_id))
            .filter(food_post::Column::DonorId.eq(donor_id.to_string()))
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.rows_affected)
    }
}

#[async_trait]
impl RequestStore for PgStore {
    async fn insert(&self, request: FoodRequest) -> Result<(), StoreError> {
        RequestEntity::insert(food_request::ActiveModel::from(request))
            .exec(&self.db)
            .await
            .map_err(insert_err)?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<FoodRequest>, StoreError> {
        RequestEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .map(FoodRequest::try_from)
            .transpose()
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<FoodRequest>, StoreError> {
        let rows = RequestEntity::find()
            .filter(food_request::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(food_request::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(FoodRequest::try_from).collect()
    }

    async fn list_open(&self) -> Result<Vec<FoodRequest>, StoreError> {
        let rows = RequestEntity::find()
            .filter(food_request::Column::Status.eq(RequestStatus::Open.as_str()))
            .order_by_desc(food_request::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(FoodRequest::try_from).collect()
    }

    async fn apply(&self, id: Uuid, patch: RequestPatch) -> Result<u64, StoreError> {
        let mut update = RequestEntity::update_many().filter(food_request::Column::Id.eq(id));
        let mut touched = false;

        if let Some(status) = patch.status {
            update = update.col_expr(food_request::Column::Status, Expr::value(status.as_str()));
            touched = true;
        }
        if let Some(matched) = patch.matched_food_id {
            update = update.col_expr(food_request::Column::MatchedFoodId, Expr::value(matched));
            touched = true;
        }
        if let Some(ngo) = patch.assigned_ngo_id {
            update = update.col_expr(food_request::Column::AssignedNgoId, Expr::value(ngo));
            touched = true;
        }
        if !touched {
            return Ok(0);
        }

        let result = update.exec(&self.db).await.map_err(query_err)?;
        Ok(result.rows_affected)
    }
}
