//! In-memory store - used when no database is configured and as the
//! fake store in tests. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use mealbridge_core::domain::{FoodPost, FoodRequest, FoodStatus, RequestStatus, User, UserType};
use mealbridge_core::error::StoreError;
use mealbridge_core::ports::{
    PostPatch, PostStore, RequestPatch, RequestStore, UserPatch, UserStore,
};

/// All three tables behind async RwLocks.
///
/// Mirrors the remote store's semantics: patches overwrite columns
/// unconditionally and the last write wins.
#[derive(Default)]
pub struct MemStore {
    users: RwLock<HashMap<String, User>>,
    posts: RwLock<Vec<FoodPost>>,
    requests: RwLock<Vec<FoodRequest>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Rows are kept in insertion order; listings walk them back to front,
// which matches created_at descending without tie-break ambiguity.
fn newest_first<T: Clone>(rows: impl DoubleEndedIterator<Item = T>) -> Vec<T> {
    rows.rev().collect()
}

#[async_trait]
impl UserStore for MemStore {
    async fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.user_id) {
            return Err(StoreError::Constraint(format!(
                "user {} already exists",
                user.user_id
            )));
        }
        users.insert(user.user_id.clone(), user);
        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn apply(&self, user_id: &str, patch: UserPatch) -> Result<u64, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(user_id) else {
            return Ok(0);
        };

        if let Some(user_type) = patch.user_type {
            user.user_type = Some(user_type);
        }
        if let Some(n) = patch.food_donated {
            user.food_donated = n;
        }
        if let Some(n) = patch.food_received {
            user.food_received = n;
        }
        if let Some(token) = patch.fcm_token {
            user.fcm_token = Some(token);
        }
        Ok(1)
    }

    async fn recipient_push_tokens(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.user_type == Some(UserType::Recipient))
            .filter_map(|u| u.fcm_token.clone())
            .collect())
    }
}

#[async_trait]
impl PostStore for MemStore {
    async fn insert(&self, post: FoodPost) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.food_id == post.food_id) {
            return Err(StoreError::Constraint(format!(
                "post {} already exists",
                post.food_id
            )));
        }
        posts.push(post);
        Ok(())
    }

    async fn find(&self, food_id: Uuid) -> Result<Option<FoodPost>, StoreError> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .find(|p| p.food_id == food_id)
            .cloned())
    }

    async fn list_by_status(&self, status: FoodStatus) -> Result<Vec<FoodPost>, StoreError> {
        let posts = self.posts.read().await;
        Ok(newest_first(
            posts.iter().filter(|p| p.status == status).cloned(),
        ))
    }

    async fn list_by_donor(&self, donor_id: &str) -> Result<Vec<FoodPost>, StoreError> {
        let posts = self.posts.read().await;
        Ok(newest_first(
            posts.iter().filter(|p| p.donor_id == donor_id).cloned(),
        ))
    }

    async fn list_claimed_by(&self, user_id: &str) -> Result<Vec<FoodPost>, StoreError> {
        let posts = self.posts.read().await;
        Ok(newest_first(
            posts
                .iter()
                .filter(|p| p.claimed_by.as_deref() == Some(user_id))
                .cloned(),
        ))
    }

    async fn list_ngo_inventory(&self, ngo_id: &str) -> Result<Vec<FoodPost>, StoreError> {
        let posts = self.posts.read().await;
        Ok(newest_first(
            posts
                .iter()
                .filter(|p| {
                    p.claimed_by.as_deref() == Some(ngo_id)
                        && matches!(p.status, FoodStatus::ClaimedByNgo | FoodStatus::InTransit)
                })
                .cloned(),
        ))
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<FoodPost>, StoreError> {
        let query = query.to_lowercase();
        let posts = self.posts.read().await;
        Ok(newest_first(
            posts
                .iter()
                .filter(|p| p.food_name.to_lowercase().contains(&query))
                .cloned(),
        ))
    }

    async fn list_by_location(&self, location: &str) -> Result<Vec<FoodPost>, StoreError> {
        let posts = self.posts.read().await;
        Ok(newest_first(
            posts.iter().filter(|p| p.location == location).cloned(),
        ))
    }

    async fn apply(&self, food_id: Uuid, patch: PostPatch) -> Result<u64, StoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.food_id == food_id) else {
            return Ok(0);
        };

        if let Some(status) = patch.status {
            post.status = status;
        }
        if let Some(claimed_by) = patch.claimed_by {
            post.claimed_by = claimed_by;
        }
        if let Some(request_id) = patch.request_id {
            post.request_id = request_id;
        }
        Ok(1)
    }

    async fn delete_owned(&self, food_id: Uuid, donor_id: &str) -> Result<u64, StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| !(p.food_id == food_id && p.donor_id == donor_id));
        Ok((before - posts.len()) as u64)
    }
}

#[async_trait]
impl RequestStore for MemStore {
    async fn insert(&self, request: FoodRequest) -> Result<(), StoreError> {
        let mut requests = self.requests.write().await;
        if requests.iter().any(|r| r.id == request.id) {
            return Err(StoreError::Constraint(format!(
                "request {} already exists",
                request.id
            )));
        }
        requests.push(request);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<FoodRequest>, StoreError> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<FoodRequest>, StoreError> {
        let requests = self.requests.read().await;
        Ok(newest_first(
            requests.iter().filter(|r| r.user_id == user_id).cloned(),
        ))
    }

    async fn list_open(&self) -> Result<Vec<FoodRequest>, StoreError> {
        let requests = self.requests.read().await;
        Ok(newest_first(
            requests
                .iter()
                .filter(|r| r.status == RequestStatus::Open)
                .cloned(),
        ))
    }

    async fn apply(&self, id: Uuid, patch: RequestPatch) -> Result<u64, StoreError> {
        let mut requests = self.requests.write().await;
        let Some(request) = requests.iter_mut().find(|r| r.id == id) else {
            return Ok(0);
        };

        if let Some(status) = patch.status {
            request.status = status;
        }
        if let Some(matched_food_id) = patch.matched_food_id {
            request.matched_food_id = matched_food_id;
        }
        if let Some(assigned_ngo_id) = patch.assigned_ngo_id {
            request.assigned_ngo_id = assigned_ngo_id;
        }
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealbridge_core::domain::NewFoodPost;

    fn user(id: &str, user_type: Option<UserType>, token: Option<&str>) -> User {
        let mut u = User::new(id.into(), format!("user {id}"), String::new(), String::new());
        u.user_type = user_type;
        u.fcm_token = token.map(Into::into);
        u
    }

    fn post(donor: &str, name: &str) -> FoodPost {
        FoodPost::new(
            donor.into(),
            "Asha".into(),
            NewFoodPost {
                food_name: name.into(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn duplicate_user_insert_is_a_constraint_violation() {
        let store = MemStore::new();
        UserStore::insert(&store, user("u1", None, None)).await.unwrap();
        let err = UserStore::insert(&store, user("u1", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn patching_a_missing_row_affects_nothing() {
        let store = MemStore::new();
        let affected = UserStore::apply(&store, "ghost", UserPatch::default())
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn recipient_tokens_skip_other_roles_and_absent_tokens() {
        let store = MemStore::new();
        UserStore::insert(&store, user("r1", Some(UserType::Recipient), Some("tok-1")))
            .await
            .unwrap();
        UserStore::insert(&store, user("r2", Some(UserType::Recipient), None))
            .await
            .unwrap();
        UserStore::insert(&store, user("d1", Some(UserType::Donor), Some("tok-2")))
            .await
            .unwrap();

        let tokens = store.recipient_push_tokens().await.unwrap();
        assert_eq!(tokens, vec!["tok-1".to_string()]);
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let store = MemStore::new();
        PostStore::insert(&store, post("d1", "first")).await.unwrap();
        PostStore::insert(&store, post("d1", "second")).await.unwrap();

        let listed = store.list_by_donor("d1").await.unwrap();
        assert_eq!(listed[0].food_name, "second");
        assert_eq!(listed[1].food_name, "first");
    }

    #[tokio::test]
    async fn delete_owned_requires_both_id_and_donor() {
        let store = MemStore::new();
        let p = post("d1", "dal");
        let id = p.food_id;
        PostStore::insert(&store, p).await.unwrap();

        assert_eq!(store.delete_owned(id, "someone-else").await.unwrap(), 0);
        assert!(PostStore::find(&store, id).await.unwrap().is_some());

        assert_eq!(store.delete_owned(id, "d1").await.unwrap(), 1);
        assert!(PostStore::find(&store, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn post_patch_distinguishes_clear_from_leave_alone() {
        let store = MemStore::new();
        let p = post("d1", "dal");
        let id = p.food_id;
        PostStore::insert(&store, p).await.unwrap();

        PostStore::apply(
            &store,
            id,
            PostPatch {
                status: Some(FoodStatus::Claimed),
                claimed_by: Some(Some("r1".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // Status-only patch leaves claimed_by alone.
        PostStore::apply(
            &store,
            id,
            PostPatch {
                status: Some(FoodStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let p = PostStore::find(&store, id).await.unwrap().unwrap();
        assert_eq!(p.status, FoodStatus::Completed);
        assert_eq!(p.claimed_by.as_deref(), Some("r1"));
    }
}
