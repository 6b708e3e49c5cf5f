//! Data store ports.
//!
//! Typed per-table views over the remote store's generic
//! query/insert/update/delete protocol. Updates are expressed as patch
//! structs: each `Some` field becomes a "set column" on every row the
//! filter matches, unconditionally. There is no compare-and-swap and no
//! cross-table transaction; concurrent writers are resolved by the
//! store's own last-write-wins ordering.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{FoodPost, FoodRequest, FoodStatus, RequestStatus, User, UserType};
use crate::error::StoreError;

/// Column overwrites for a `users` row.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub user_type: Option<UserType>,
    pub food_donated: Option<u32>,
    pub food_received: Option<u32>,
    pub fcm_token: Option<String>,
}

/// Column overwrites for a `food_posts` row.
///
/// The nested options distinguish "leave alone" (outer `None`) from
/// "set to NULL" (inner `None`).
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub status: Option<FoodStatus>,
    pub claimed_by: Option<Option<String>>,
    pub request_id: Option<Option<Uuid>>,
}

/// Column overwrites for a `food_requests` row.
#[derive(Debug, Clone, Default)]
pub struct RequestPatch {
    pub status: Option<RequestStatus>,
    pub matched_food_id: Option<Option<Uuid>>,
    pub assigned_ngo_id: Option<Option<String>>,
}

/// `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: User) -> Result<(), StoreError>;

    async fn find(&self, user_id: &str) -> Result<Option<User>, StoreError>;

    /// Apply the patch to the row matching `user_id`. Returns affected
    /// row count; zero means the user does not exist.
    async fn apply(&self, user_id: &str, patch: UserPatch) -> Result<u64, StoreError>;

    /// Push tokens of every recipient-type user that has one.
    async fn recipient_push_tokens(&self) -> Result<Vec<String>, StoreError>;
}

/// `food_posts` table. All listings are newest-first.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: FoodPost) -> Result<(), StoreError>;

    async fn find(&self, food_id: Uuid) -> Result<Option<FoodPost>, StoreError>;

    async fn list_by_status(&self, status: FoodStatus) -> Result<Vec<FoodPost>, StoreError>;

    async fn list_by_donor(&self, donor_id: &str) -> Result<Vec<FoodPost>, StoreError>;

    async fn list_claimed_by(&self, user_id: &str) -> Result<Vec<FoodPost>, StoreError>;

    /// Posts an NGO is currently handling: claimed by it and either
    /// `claimed_by_ngo` or `in_transit`.
    async fn list_ngo_inventory(&self, ngo_id: &str) -> Result<Vec<FoodPost>, StoreError>;

    /// Case-insensitive substring match on `food_name`.
    async fn search_by_name(&self, query: &str) -> Result<Vec<FoodPost>, StoreError>;

    async fn list_by_location(&self, location: &str) -> Result<Vec<FoodPost>, StoreError>;

    /// Apply the patch to the row matching `food_id`, unconditionally.
    /// Returns affected row count.
    async fn apply(&self, food_id: Uuid, patch: PostPatch) -> Result<u64, StoreError>;

    /// Delete the row matching `food_id` AND `donor_id`. The ownership
    /// check is the compound filter itself: a non-owner gets zero
    /// affected rows, not an error.
    async fn delete_owned(&self, food_id: Uuid, donor_id: &str) -> Result<u64, StoreError>;
}

/// `food_requests` table. All listings are newest-first.
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn insert(&self, request: FoodRequest) -> Result<(), StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<FoodRequest>, StoreError>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<FoodRequest>, StoreError>;

    async fn list_open(&self) -> Result<Vec<FoodRequest>, StoreError>;

    /// Apply the patch to the row matching `id`. Returns affected rows.
    async fn apply(&self, id: Uuid, patch: RequestPatch) -> Result<u64, StoreError>;
}
