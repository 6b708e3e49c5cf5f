//! Request matching manager.
//!
//! Owns the [`FoodRequest`] lifecycle and the cross-entity match that
//! links a request to the post fulfilling it.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{FoodRequest, FoodStatus, NewFoodRequest, RequestStatus};
use crate::error::DomainError;
use crate::ports::{PostPatch, PostStore, RequestPatch, RequestStore};
use crate::service::require_actor;

pub struct RequestMatching {
    requests: Arc<dyn RequestStore>,
    posts: Arc<dyn PostStore>,
}

impl RequestMatching {
    pub fn new(requests: Arc<dyn RequestStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { requests, posts }
    }

    /// File an open request on behalf of `user_id`.
    pub async fn create_request(
        &self,
        user_id: &str,
        fields: NewFoodRequest,
    ) -> Result<Uuid, DomainError> {
        require_actor(user_id)?;

        let request = FoodRequest::new(user_id.to_string(), fields);
        let id = request.id;
        self.requests.insert(request).await?;

        tracing::info!(request_id = %id, user_id = %user_id, "Food request created");
        Ok(id)
    }

    /// The requester's own requests, newest first.
    pub async fn user_requests(&self, user_id: &str) -> Result<Vec<FoodRequest>, DomainError> {
        require_actor(user_id)?;
        Ok(self.requests.list_by_user(user_id).await?)
    }

    /// Unmet need, newest first. Used by NGOs browsing.
    pub async fn open_requests(&self) -> Result<Vec<FoodRequest>, DomainError> {
        Ok(self.requests.list_open().await?)
    }

    /// Link a request to the post fulfilling it.
    ///
    /// Two sequential, independently-failable writes: the request is
    /// marked fulfilled first, then the post delivered. There is no
    /// compensating rollback - when the second write fails the store is
    /// left with a fulfilled request pointing at an undelivered post,
    /// and the whole operation is reported as failed.
    pub async fn match_request_with_food(
        &self,
        request_id: Uuid,
        food_id: Uuid,
        ngo_id: &str,
    ) -> Result<(), DomainError> {
        require_actor(ngo_id)?;

        self.requests
            .apply(
                request_id,
                RequestPatch {
                    status: Some(RequestStatus::Fulfilled),
                    matched_food_id: Some(Some(food_id)),
                    assigned_ngo_id: Some(Some(ngo_id.to_string())),
                },
            )
            .await?;

        self.posts
            .apply(
                food_id,
                PostPatch {
                    status: Some(FoodStatus::Delivered),
                    request_id: Some(Some(request_id)),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(request_id = %request_id, %food_id, ngo = %ngo_id, "Request matched");
        Ok(())
    }
}
