//! Food lifecycle manager.
//!
//! Owns the state machine transitions of a [`FoodPost`]: posting,
//! claiming, the NGO delivery pipeline, deletion, and completion.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{FoodPost, FoodStatus, NewFoodPost};
use crate::error::DomainError;
use crate::ports::{PostPatch, PostStore, UserPatch, UserStore};
use crate::service::{Notifications, require_actor};

pub struct FoodLifecycle {
    users: Arc<dyn UserStore>,
    posts: Arc<dyn PostStore>,
    notifications: Notifications,
}

impl FoodLifecycle {
    pub fn new(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        notifications: Notifications,
    ) -> Self {
        Self {
            users,
            posts,
            notifications,
        }
    }

    /// Post surplus food on behalf of `donor_id`.
    ///
    /// Inserts the post, then bumps the donor's `food_donated` counter
    /// in a second, independent write. When the insert fails the
    /// counter write is never attempted; when the counter write fails
    /// the post stays inserted (no rollback). Recipients are notified
    /// off the primary path.
    pub async fn post_food(
        &self,
        donor_id: &str,
        fields: NewFoodPost,
    ) -> Result<Uuid, DomainError> {
        require_actor(donor_id)?;

        let donor = self.users.find(donor_id).await?;
        let (donor_name, donated) = donor
            .map(|u| (u.name, u.food_donated))
            .unwrap_or_else(|| ("Anonymous".to_string(), 0));

        let post = FoodPost::new(donor_id.to_string(), donor_name.clone(), fields);
        let food_id = post.food_id;
        let food_name = post.food_name.clone();
        let location = post.location.clone();

        self.posts.insert(post).await?;

        self.users
            .apply(
                donor_id,
                UserPatch {
                    food_donated: Some(donated + 1),
                    ..Default::default()
                },
            )
            .await?;

        self.notifications
            .notify_recipients_new_food(&food_name, &donor_name, &location);

        tracing::info!(%food_id, donor_id = %donor_id, "Food posted");
        Ok(food_id)
    }

    /// Posts currently up for grabs, newest first.
    pub async fn available_food(&self) -> Result<Vec<FoodPost>, DomainError> {
        Ok(self.posts.list_by_status(FoodStatus::Available).await?)
    }

    pub async fn my_donations(&self, donor_id: &str) -> Result<Vec<FoodPost>, DomainError> {
        require_actor(donor_id)?;
        Ok(self.posts.list_by_donor(donor_id).await?)
    }

    pub async fn my_claimed(&self, user_id: &str) -> Result<Vec<FoodPost>, DomainError> {
        require_actor(user_id)?;
        Ok(self.posts.list_claimed_by(user_id).await?)
    }

    /// Posts an NGO has claimed and not yet delivered.
    pub async fn ngo_inventory(&self, ngo_id: &str) -> Result<Vec<FoodPost>, DomainError> {
        require_actor(ngo_id)?;
        Ok(self.posts.list_ngo_inventory(ngo_id).await?)
    }

    /// Claim a post as an individual recipient.
    ///
    /// The write is an unconditional overwrite: it does not re-check
    /// that the post was still available, so two racing claimants both
    /// succeed and the store keeps whichever write landed last.
    pub async fn claim_food(&self, food_id: Uuid, claimant_id: &str) -> Result<(), DomainError> {
        self.claim(food_id, claimant_id, FoodStatus::Claimed).await
    }

    /// Claim a post into an NGO's delivery pipeline.
    pub async fn claim_food_as_ngo(&self, food_id: Uuid, ngo_id: &str) -> Result<(), DomainError> {
        self.claim(food_id, ngo_id, FoodStatus::ClaimedByNgo).await
    }

    async fn claim(
        &self,
        food_id: Uuid,
        claimant_id: &str,
        status: FoodStatus,
    ) -> Result<(), DomainError> {
        require_actor(claimant_id)?;

        let post = self
            .posts
            .find(food_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "food post",
                id: food_id.to_string(),
            })?;

        self.posts
            .apply(
                food_id,
                PostPatch {
                    status: Some(status),
                    claimed_by: Some(Some(claimant_id.to_string())),
                    ..Default::default()
                },
            )
            .await?;

        self.notifications
            .notify_donor_claimed(&post.donor_id, "Someone", &post.food_name);

        tracing::info!(%food_id, claimant = %claimant_id, new_status = %status, "Food claimed");
        Ok(())
    }

    /// Delete a post, but only if `requester_id` is its donor.
    ///
    /// Ownership is a compound filter, not a precondition read: a
    /// non-owner affects zero rows and the call still reports success.
    pub async fn delete_food(&self, food_id: Uuid, requester_id: &str) -> Result<(), DomainError> {
        require_actor(requester_id)?;

        let affected = self.posts.delete_owned(food_id, requester_id).await?;
        if affected == 0 {
            tracing::debug!(%food_id, requester = %requester_id, "Delete matched no rows");
        }
        Ok(())
    }

    /// Overwrite status to completed. Authorization is the caller's
    /// responsibility at this layer.
    pub async fn mark_completed(&self, food_id: Uuid) -> Result<(), DomainError> {
        self.posts
            .apply(
                food_id,
                PostPatch {
                    status: Some(FoodStatus::Completed),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    /// Advance a post along the NGO pipeline
    /// (`claimed_by_ngo -> in_transit -> delivered`).
    ///
    /// Unlike the claim path, illegal moves are rejected here instead
    /// of being left to UI affordances. Only the pickup and deliver
    /// moves are accepted: claiming goes through [`Self::claim_food`]
    /// and friends, which also set `claimed_by`, and completion goes
    /// through [`Self::mark_completed`].
    pub async fn advance_status(
        &self,
        food_id: Uuid,
        new_status: FoodStatus,
    ) -> Result<(), DomainError> {
        let post = self
            .posts
            .find(food_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "food post",
                id: food_id.to_string(),
            })?;

        let pipeline_move = matches!(
            new_status,
            FoodStatus::InTransit | FoodStatus::Delivered
        );
        if !pipeline_move || !post.status.can_transition(new_status) {
            return Err(DomainError::InvalidTransition {
                from: post.status,
                to: new_status,
            });
        }

        self.posts
            .apply(
                food_id,
                PostPatch {
                    status: Some(new_status),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(%food_id, from = %post.status, to = %new_status, "Status advanced");
        Ok(())
    }

    /// Store-side name search.
    pub async fn search_food(&self, query: &str) -> Result<Vec<FoodPost>, DomainError> {
        Ok(self.posts.search_by_name(query).await?)
    }

    /// Store-side exact location filter.
    pub async fn food_by_location(&self, location: &str) -> Result<Vec<FoodPost>, DomainError> {
        Ok(self.posts.list_by_location(location).await?)
    }
}
