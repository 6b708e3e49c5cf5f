use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use mealbridge_core::domain::{FoodPost, FoodStatus};
use mealbridge_core::ports::{PostPatch, PostStore, UserStore};

use super::entity::{food_post, user};
use super::pg_store::PgStore;

fn post_model(food_id: Uuid, status: &str) -> food_post::Model {
    food_post::Model {
        food_id,
        donor_id: "donor-1".to_owned(),
        donor_name: "Asha".to_owned(),
        food_name: "Rice Bowl".to_owned(),
        quantity: "5kg".to_owned(),
        description: String::new(),
        image_url: String::new(),
        pickup_time: String::new(),
        location: "Delhi".to_owned(),
        latitude: 0.0,
        longitude: 0.0,
        status: status.to_owned(),
        claimed_by: None,
        request_id: None,
        created_at: 1_700_000_000_000,
    }
}

#[tokio::test]
async fn find_post_decodes_status_string() {
    let food_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(food_id, "available")]])
        .into_connection();

    let store = PgStore::new(db);
    let result: Option<FoodPost> = PostStore::find(&store, food_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.food_id, food_id);
    assert_eq!(post.status, FoodStatus::Available);
    assert!(post.claimed_by.is_none());
}

#[tokio::test]
async fn unknown_status_string_is_a_query_error() {
    let food_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(food_id, "teleported")]])
        .into_connection();

    let store = PgStore::new(db);
    assert!(PostStore::find(&store, food_id).await.is_err());
}

#[tokio::test]
async fn negative_counter_column_is_a_query_error() {
    let model = user::Model {
        user_id: "u1".to_owned(),
        name: "Asha".to_owned(),
        email: String::new(),
        phone: String::new(),
        user_type: None,
        food_donated: -1,
        food_received: 0,
        profile_image_url: String::new(),
        fcm_token: None,
        created_at: 1_700_000_000_000,
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let store = PgStore::new(db);
    assert!(UserStore::find(&store, "u1").await.is_err());
}

#[tokio::test]
async fn apply_reports_affected_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let store = PgStore::new(db);
    let affected = PostStore::apply(
        &store,
        Uuid::new_v4(),
        PostPatch {
            status: Some(FoodStatus::Claimed),
            claimed_by: Some(Some("r-1".to_owned())),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(affected, 1);
}

#[tokio::test]
async fn empty_patch_never_touches_the_database() {
    // No exec results queued: any statement would panic the mock.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let store = PgStore::new(db);
    let affected = PostStore::apply(&store, Uuid::new_v4(), PostPatch::default())
        .await
        .unwrap();

    assert_eq!(affected, 0);
}
