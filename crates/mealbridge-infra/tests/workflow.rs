//! End-to-end workflow tests over the in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use mealbridge_core::domain::{
    FoodPost, FoodStatus, NewFoodPost, NewFoodRequest, RequestStatus, Urgency, User, UserType,
};
use mealbridge_core::error::{DomainError, StoreError};
use mealbridge_core::ports::{PostPatch, PostStore, PushSender, RequestStore, UserStore};
use mealbridge_core::service::{
    Accounts, FoodLifecycle, NotificationDispatch, Notifications, RequestMatching,
};
use mealbridge_infra::MemStore;

fn donor(id: &str, name: &str, donated: u32) -> User {
    let mut u = User::new(id.into(), name.into(), String::new(), String::new());
    u.user_type = Some(UserType::Donor);
    u.food_donated = donated;
    u
}

fn draft(name: &str) -> NewFoodPost {
    NewFoodPost {
        food_name: name.into(),
        quantity: "5kg".into(),
        location: "Delhi".into(),
        ..Default::default()
    }
}

fn lifecycle(store: &Arc<MemStore>) -> FoodLifecycle {
    FoodLifecycle::new(store.clone(), store.clone(), Notifications::disabled())
}

fn matching(store: &Arc<MemStore>) -> RequestMatching {
    RequestMatching::new(store.clone(), store.clone())
}

/// PostStore wrapper whose writes can be made to fail on demand.
struct FlakyPosts {
    inner: Arc<MemStore>,
    fail_insert: AtomicBool,
    fail_apply: AtomicBool,
}

impl FlakyPosts {
    fn new(inner: Arc<MemStore>) -> Self {
        Self {
            inner,
            fail_insert: AtomicBool::new(false),
            fail_apply: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl PostStore for FlakyPosts {
    async fn insert(&self, post: FoodPost) -> Result<(), StoreError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("simulated outage".into()));
        }
        PostStore::insert(&*self.inner, post).await
    }

    async fn find(&self, food_id: Uuid) -> Result<Option<FoodPost>, StoreError> {
        PostStore::find(&*self.inner, food_id).await
    }

    async fn list_by_status(&self, status: FoodStatus) -> Result<Vec<FoodPost>, StoreError> {
        self.inner.list_by_status(status).await
    }

    async fn list_by_donor(&self, donor_id: &str) -> Result<Vec<FoodPost>, StoreError> {
        self.inner.list_by_donor(donor_id).await
    }

    async fn list_claimed_by(&self, user_id: &str) -> Result<Vec<FoodPost>, StoreError> {
        self.inner.list_claimed_by(user_id).await
    }

    async fn list_ngo_inventory(&self, ngo_id: &str) -> Result<Vec<FoodPost>, StoreError> {
        self.inner.list_ngo_inventory(ngo_id).await
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<FoodPost>, StoreError> {
        self.inner.search_by_name(query).await
    }

    async fn list_by_location(&self, location: &str) -> Result<Vec<FoodPost>, StoreError> {
        self.inner.list_by_location(location).await
    }

    async fn apply(&self, food_id: Uuid, patch: PostPatch) -> Result<u64, StoreError> {
        if self.fail_apply.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("simulated outage".into()));
        }
        PostStore::apply(&*self.inner, food_id, patch).await
    }

    async fn delete_owned(&self, food_id: Uuid, donor_id: &str) -> Result<u64, StoreError> {
        self.inner.delete_owned(food_id, donor_id).await
    }
}

/// Records every push it is asked to deliver.
#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl PushSender for RecordingSender {
    async fn send(&self, token: &str, title: &str, body: &str) -> Result<(), String> {
        self.sent
            .lock()
            .await
            .push((token.into(), title.into(), body.into()));
        Ok(())
    }
}

#[tokio::test]
async fn posted_food_shows_up_available_and_unclaimed() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 0)).await.unwrap();

    let lc = lifecycle(&store);
    let food_id = lc.post_food("d1", draft("Rice Bowl")).await.unwrap();

    let available = lc.available_food().await.unwrap();
    let post = available.iter().find(|p| p.food_id == food_id).unwrap();
    assert_eq!(post.status, FoodStatus::Available);
    assert!(post.claimed_by.is_none());
    assert_eq!(post.donor_name, "Asha");
}

#[tokio::test]
async fn posting_bumps_the_donated_counter() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 3)).await.unwrap();

    lifecycle(&store).post_food("d1", draft("Dal")).await.unwrap();

    let u = UserStore::find(&*store, "d1").await.unwrap().unwrap();
    assert_eq!(u.food_donated, 4);
}

#[tokio::test]
async fn failed_insert_skips_the_counter_bump() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 3)).await.unwrap();

    let posts = Arc::new(FlakyPosts::new(store.clone()));
    posts.fail_insert.store(true, Ordering::SeqCst);
    let lc = FoodLifecycle::new(store.clone(), posts, Notifications::disabled());

    assert!(lc.post_food("d1", draft("Dal")).await.is_err());

    let u = UserStore::find(&*store, "d1").await.unwrap().unwrap();
    assert_eq!(u.food_donated, 3);
}

#[tokio::test]
async fn posting_without_an_identity_fails() {
    let store = Arc::new(MemStore::new());
    let err = lifecycle(&store).post_food("", draft("Dal")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotLoggedIn));
}

#[tokio::test]
async fn unknown_donor_posts_as_anonymous() {
    let store = Arc::new(MemStore::new());
    let lc = lifecycle(&store);

    let food_id = lc.post_food("ghost", draft("Dal")).await.unwrap();
    let post = PostStore::find(&*store, food_id).await.unwrap().unwrap();
    assert_eq!(post.donor_name, "Anonymous");
}

#[tokio::test]
async fn claim_sets_status_and_claimant_together() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 0)).await.unwrap();

    let lc = lifecycle(&store);
    let food_id = lc.post_food("d1", draft("Dal")).await.unwrap();
    lc.claim_food(food_id, "r1").await.unwrap();

    let post = PostStore::find(&*store, food_id).await.unwrap().unwrap();
    assert_eq!(post.status, FoodStatus::Claimed);
    assert_eq!(post.claimed_by.as_deref(), Some("r1"));

    // claimed_by non-null iff status != available, on every row
    for p in PostStore::list_by_donor(&*store, "d1").await.unwrap() {
        assert_eq!(p.claimed_by.is_some(), p.status != FoodStatus::Available);
    }
}

#[tokio::test]
async fn claiming_a_missing_post_is_not_found() {
    let store = Arc::new(MemStore::new());
    let err = lifecycle(&store)
        .claim_food(Uuid::new_v4(), "r1")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn concurrent_claims_both_succeed_and_exactly_one_wins() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 0)).await.unwrap();

    let lc = Arc::new(lifecycle(&store));
    let food_id = lc.post_food("d1", draft("Dal")).await.unwrap();

    let (a, b) = tokio::join!(lc.claim_food(food_id, "alice"), lc.claim_food(food_id, "bob"));
    a.unwrap();
    b.unwrap();

    let post = PostStore::find(&*store, food_id).await.unwrap().unwrap();
    let winner = post.claimed_by.as_deref().unwrap();
    assert!(winner == "alice" || winner == "bob");
    assert_eq!(post.status, FoodStatus::Claimed);
}

#[tokio::test]
async fn delete_by_non_donor_is_a_silent_noop() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 0)).await.unwrap();

    let lc = lifecycle(&store);
    let food_id = lc.post_food("d1", draft("Dal")).await.unwrap();

    lc.delete_food(food_id, "not-the-donor").await.unwrap();
    assert!(PostStore::find(&*store, food_id).await.unwrap().is_some());

    lc.delete_food(food_id, "d1").await.unwrap();
    assert!(PostStore::find(&*store, food_id).await.unwrap().is_none());
}

#[tokio::test]
async fn ngo_pipeline_advances_and_rejects_illegal_moves() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 0)).await.unwrap();

    let lc = lifecycle(&store);
    let food_id = lc.post_food("d1", draft("Dal")).await.unwrap();
    lc.claim_food_as_ngo(food_id, "ngo1").await.unwrap();

    // delivered straight from claimed_by_ngo skips in_transit
    let err = lc
        .advance_status(food_id, FoodStatus::Delivered)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));

    lc.advance_status(food_id, FoodStatus::InTransit).await.unwrap();
    lc.advance_status(food_id, FoodStatus::Delivered).await.unwrap();

    let post = PostStore::find(&*store, food_id).await.unwrap().unwrap();
    assert_eq!(post.status, FoodStatus::Delivered);
}

#[tokio::test]
async fn advance_status_rejects_claim_type_statuses() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 0)).await.unwrap();

    let lc = lifecycle(&store);
    let food_id = lc.post_food("d1", draft("Dal")).await.unwrap();

    // claiming must go through claim_food, which also sets claimed_by;
    // sneaking a claim status through the pipeline endpoint would leave
    // a claimed post with no claimant
    for status in [
        FoodStatus::Claimed,
        FoodStatus::ClaimedByNgo,
        FoodStatus::Completed,
    ] {
        let err = lc.advance_status(food_id, status).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    let post = PostStore::find(&*store, food_id).await.unwrap().unwrap();
    assert_eq!(post.status, FoodStatus::Available);
    assert!(post.claimed_by.is_none());
}

#[tokio::test]
async fn ngo_inventory_tracks_undelivered_claims() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 0)).await.unwrap();

    let lc = lifecycle(&store);
    let a = lc.post_food("d1", draft("Dal")).await.unwrap();
    let b = lc.post_food("d1", draft("Rice")).await.unwrap();

    lc.claim_food_as_ngo(a, "ngo1").await.unwrap();
    lc.claim_food_as_ngo(b, "ngo1").await.unwrap();
    lc.advance_status(b, FoodStatus::InTransit).await.unwrap();
    lc.advance_status(b, FoodStatus::Delivered).await.unwrap();

    let inventory = lc.ngo_inventory("ngo1").await.unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].food_id, a);
}

#[tokio::test]
async fn match_links_request_and_post() {
    let store = Arc::new(MemStore::new());
    UserStore::insert(&*store, donor("d1", "Asha", 0)).await.unwrap();

    let lc = lifecycle(&store);
    let mm = matching(&store);

    let food_id = lc.post_food("d1", draft("Rice")).await.unwrap();
    let request_id = mm
        .create_request(
            "u1",
            NewFoodRequest {
                food_name: "Rice".into(),
                quantity: "5kg".into(),
                location: "Delhi".into(),
                urgency: Urgency::Urgent,
            },
        )
        .await
        .unwrap();

    mm.match_request_with_food(request_id, food_id, "ngo1")
        .await
        .unwrap();

    let request = RequestStore::find(&*store, request_id).await.unwrap().unwrap();
    assert_eq!(request.status, RequestStatus::Fulfilled);
    assert_eq!(request.matched_food_id, Some(food_id));
    assert_eq!(request.assigned_ngo_id.as_deref(), Some("ngo1"));

    let post = PostStore::find(&*store, food_id).await.unwrap().unwrap();
    assert_eq!(post.status, FoodStatus::Delivered);
    assert_eq!(post.request_id, Some(request_id));

    assert!(mm.open_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_post_write_leaves_request_fulfilled() {
    // Documented partial state: no rollback across the two writes.
    let store = Arc::new(MemStore::new());
    let posts = Arc::new(FlakyPosts::new(store.clone()));

    let lc = FoodLifecycle::new(store.clone(), posts.clone(), Notifications::disabled());
    let mm = RequestMatching::new(store.clone(), posts.clone());

    let food_id = lc.post_food("d1", draft("Rice")).await.unwrap();
    let request_id = mm
        .create_request(
            "u1",
            NewFoodRequest {
                food_name: "Rice".into(),
                quantity: "5kg".into(),
                location: "Delhi".into(),
                urgency: Urgency::Normal,
            },
        )
        .await
        .unwrap();

    posts.fail_apply.store(true, Ordering::SeqCst);
    assert!(
        mm.match_request_with_food(request_id, food_id, "ngo1")
            .await
            .is_err()
    );

    let request = RequestStore::find(&*store, request_id).await.unwrap().unwrap();
    assert_eq!(request.status, RequestStatus::Fulfilled);

    let post = PostStore::find(&*store, food_id).await.unwrap().unwrap();
    assert_ne!(post.status, FoodStatus::Delivered);
    assert_eq!(post.request_id, None);
}

#[tokio::test]
async fn request_listings_are_per_user_and_newest_first() {
    let store = Arc::new(MemStore::new());
    let mm = matching(&store);

    for name in ["Rice", "Dal"] {
        mm.create_request(
            "u1",
            NewFoodRequest {
                food_name: name.into(),
                quantity: "1kg".into(),
                location: "Delhi".into(),
                urgency: Urgency::Normal,
            },
        )
        .await
        .unwrap();
    }
    mm.create_request(
        "u2",
        NewFoodRequest {
            food_name: "Bread".into(),
            quantity: "1kg".into(),
            location: "Delhi".into(),
            urgency: Urgency::Immediate,
        },
    )
    .await
    .unwrap();

    let mine = mm.user_requests("u1").await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].food_name, "Dal");

    assert_eq!(mm.open_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn onboarding_sets_role_and_token() {
    let store = Arc::new(MemStore::new());
    let accounts = Accounts::new(store.clone());

    accounts
        .register_profile(User::new(
            "u1".into(),
            "Ravi".into(),
            "ravi@example.com".into(),
            String::new(),
        ))
        .await
        .unwrap();

    accounts.set_user_type("u1", UserType::Ngo).await.unwrap();
    accounts.save_push_token("u1", "tok-9").await.unwrap();

    let u = accounts.user("u1").await.unwrap();
    assert_eq!(u.user_type, Some(UserType::Ngo));
    assert_eq!(u.fcm_token.as_deref(), Some("tok-9"));

    let err = accounts.user("missing").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn new_food_push_goes_to_every_recipient_token() {
    let store = Arc::new(MemStore::new());

    let mut r1 = User::new("r1".into(), "Meera".into(), String::new(), String::new());
    r1.user_type = Some(UserType::Recipient);
    r1.fcm_token = Some("tok-r1".into());
    let mut r2 = User::new("r2".into(), "Kiran".into(), String::new(), String::new());
    r2.user_type = Some(UserType::Recipient); // no token: skipped
    UserStore::insert(&*store, donor("d1", "Asha", 0)).await.unwrap();
    UserStore::insert(&*store, r1).await.unwrap();
    UserStore::insert(&*store, r2).await.unwrap();

    let sender = Arc::new(RecordingSender::default());
    let (notifications, _dispatch) = NotificationDispatch::spawn(store.clone(), sender.clone());

    let lc = FoodLifecycle::new(store.clone(), store.clone(), notifications);
    lc.post_food("d1", draft("Dal")).await.unwrap();

    // dispatch runs off the primary path
    tokio::time::sleep(Duration::from_millis(100)).await;

    let sent = sender.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "tok-r1");
    assert!(sent[0].2.contains("Dal"));
}

#[tokio::test]
async fn claim_push_reaches_the_donor() {
    let store = Arc::new(MemStore::new());

    let mut d = donor("d1", "Asha", 0);
    d.fcm_token = Some("tok-d1".into());
    UserStore::insert(&*store, d).await.unwrap();

    let sender = Arc::new(RecordingSender::default());
    let (notifications, _dispatch) = NotificationDispatch::spawn(store.clone(), sender.clone());

    let lc = FoodLifecycle::new(store.clone(), store.clone(), notifications);
    let food_id = lc.post_food("d1", draft("Dal")).await.unwrap();
    lc.claim_food(food_id, "r1").await.unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;

    let sent = sender.sent.lock().await;
    // no recipients registered, so only the claim push shows up
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "tok-d1");
    assert_eq!(sent[0].1, "Your food was claimed");
}
