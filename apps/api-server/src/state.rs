//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use mealbridge_core::ports::{PostStore, PushSender, RequestStore, UserStore};
use mealbridge_core::service::{
    Accounts, FoodLifecycle, NotificationDispatch, RequestMatching,
};
use mealbridge_infra::{LogPushSender, MemStore};
use mealbridge_infra::{EdgePushConfig, EdgePushSender};

use crate::background::FeedPoller;
use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<FoodLifecycle>,
    pub matching: Arc<RequestMatching>,
    pub accounts: Arc<Accounts>,
    /// Periodically refreshed available-food snapshot.
    pub feed: Arc<FeedPoller>,
    /// Which store the server ended up wired to.
    pub store_backend: &'static str,
    // Keeps the dispatcher task alive for the server's lifetime.
    _dispatch: Arc<NotificationDispatch>,
}

type Stores = (Arc<dyn UserStore>, Arc<dyn PostStore>, Arc<dyn RequestStore>);

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let ((users, posts, requests), store_backend) = Self::connect_stores(config).await;

        let sender: Arc<dyn PushSender> = match &config.edge_push_url {
            Some(url) => Arc::new(EdgePushSender::new(EdgePushConfig {
                url: url.clone(),
                service_token: config.edge_push_token.clone(),
            })),
            None => {
                tracing::info!("EDGE_PUSH_URL not set, pushes are log-only");
                Arc::new(LogPushSender)
            }
        };

        let (notifications, dispatch) = NotificationDispatch::spawn(users.clone(), sender);

        let feed = FeedPoller::spawn(
            posts.clone(),
            Duration::from_secs(config.feed_refresh_secs),
        );

        tracing::info!("Application state initialized");

        Self {
            lifecycle: Arc::new(FoodLifecycle::new(
                users.clone(),
                posts.clone(),
                notifications,
            )),
            matching: Arc::new(RequestMatching::new(requests, posts)),
            accounts: Arc::new(Accounts::new(users)),
            feed: Arc::new(feed),
            store_backend,
            _dispatch: Arc::new(dispatch),
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect_stores(config: &AppConfig) -> (Stores, &'static str) {
        use mealbridge_infra::{DatabaseConfig, PgStore, connect};

        if let Some(url) = &config.database_url {
            let db_config = DatabaseConfig {
                url: url.clone(),
                max_connections: config.db_max_connections,
                min_connections: config.db_min_connections,
            };
            match connect(&db_config).await {
                Ok(conn) => {
                    let store = Arc::new(PgStore::new(conn));
                    return ((store.clone(), store.clone(), store), "postgres");
                }
                Err(err) => {
                    tracing::error!(
                        "Failed to connect to database: {err}. Using in-memory fallback."
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        (Self::memory_stores(), "memory")
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_stores(_config: &AppConfig) -> (Stores, &'static str) {
        tracing::info!("Running without postgres feature - using in-memory store");
        (Self::memory_stores(), "memory")
    }

    fn memory_stores() -> Stores {
        let store = Arc::new(MemStore::new());
        (store.clone(), store.clone(), store)
    }
}
