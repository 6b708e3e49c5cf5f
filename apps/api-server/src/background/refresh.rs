//! Periodic feed refresh.
//!
//! The store has no change-notification channel, so live updates are a
//! poll: every tick the available-food listing is re-read into a watch
//! channel. Staleness is bounded by the tick interval; handlers that
//! need fresh data read the store directly instead.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use mealbridge_core::domain::{FoodPost, FoodStatus};
use mealbridge_core::ports::PostStore;

/// Cancellable polling task. The task is aborted when the poller drops,
/// tying it to its owner's lifetime.
pub struct FeedPoller {
    handle: JoinHandle<()>,
    rx: watch::Receiver<Vec<FoodPost>>,
}

impl FeedPoller {
    pub fn spawn(posts: Arc<dyn PostStore>, every: Duration) -> Self {
        let (tx, rx) = watch::channel(Vec::new());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match posts.list_by_status(FoodStatus::Available).await {
                    Ok(list) => {
                        tracing::debug!(count = list.len(), "Feed refreshed");
                        let _ = tx.send(list);
                    }
                    // Keep the previous snapshot and try again next tick.
                    Err(err) => tracing::warn!(error = %err, "Feed refresh failed"),
                }
            }
        });

        tracing::info!(every_secs = every.as_secs(), "Feed poller started");
        Self { handle, rx }
    }

    /// Latest snapshot of available posts.
    pub fn snapshot(&self) -> Vec<FoodPost> {
        self.rx.borrow().clone()
    }
}

impl Drop for FeedPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
