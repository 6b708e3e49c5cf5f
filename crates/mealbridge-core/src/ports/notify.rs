//! Notifier boundary.
//!
//! Send-only and best-effort: nothing in the primary flow ever waits on
//! a push, and a failed send is logged and dropped.

use async_trait::async_trait;

/// A state change worth telling the counterpart about.
#[derive(Debug, Clone)]
pub enum NotifyEvent {
    /// A donor posted food; recipients should hear about it.
    NewFood {
        food_name: String,
        donor_name: String,
        location: String,
    },
    /// Someone claimed a post; the donor should hear about it.
    FoodClaimed {
        donor_id: String,
        claimant_label: String,
        food_name: String,
    },
}

/// One push message to one device token.
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, token: &str, title: &str, body: &str) -> Result<(), String>;
}
