//! Notification dispatch.
//!
//! Managers hand a [`NotifyEvent`] to the [`Notifications`] channel and
//! move on; a background task resolves push tokens and sends one
//! message per token. Failures anywhere in here are logged and
//! swallowed - a push must never fail the caller's primary action.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ports::{NotifyEvent, PushSender, UserStore};

const EVENT_BUFFER: usize = 64;

/// Cheap, cloneable handle the managers use to emit events.
#[derive(Clone)]
pub struct Notifications {
    tx: Option<mpsc::Sender<NotifyEvent>>,
}

impl Notifications {
    /// A handle that drops every event. For tests and for wiring where
    /// no push backend is configured.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Enqueue without awaiting delivery. A full or closed channel
    /// drops the event.
    pub fn emit(&self, event: NotifyEvent) {
        let Some(tx) = &self.tx else { return };
        if let Err(err) = tx.try_send(event) {
            tracing::warn!(error = %err, "Notification event dropped");
        }
    }

    pub fn notify_recipients_new_food(&self, food_name: &str, donor_name: &str, location: &str) {
        self.emit(NotifyEvent::NewFood {
            food_name: food_name.to_string(),
            donor_name: donor_name.to_string(),
            location: location.to_string(),
        });
    }

    pub fn notify_donor_claimed(&self, donor_id: &str, claimant_label: &str, food_name: &str) {
        self.emit(NotifyEvent::FoodClaimed {
            donor_id: donor_id.to_string(),
            claimant_label: claimant_label.to_string(),
            food_name: food_name.to_string(),
        });
    }
}

/// The background consumer side of [`Notifications`].
pub struct NotificationDispatch {
    handle: JoinHandle<()>,
}

impl NotificationDispatch {
    /// Spawn the dispatcher task and return the emit handle with it.
    pub fn spawn(
        users: Arc<dyn UserStore>,
        sender: Arc<dyn PushSender>,
    ) -> (Notifications, NotificationDispatch) {
        let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);

        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                dispatch_event(&*users, &*sender, event).await;
            }
            tracing::debug!("Notification channel closed, dispatcher exiting");
        });

        (Notifications { tx: Some(tx) }, NotificationDispatch { handle })
    }

    /// Stop consuming. In-flight sends are abandoned.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for NotificationDispatch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn dispatch_event(users: &dyn UserStore, sender: &dyn PushSender, event: NotifyEvent) {
    match event {
        NotifyEvent::NewFood {
            food_name,
            donor_name,
            location,
        } => {
            let tokens = match users.recipient_push_tokens().await {
                Ok(tokens) => tokens,
                Err(err) => {
                    tracing::warn!(error = %err, "Recipient token lookup failed");
                    return;
                }
            };

            let title = "New food available";
            let body = format!("{donor_name} shared {food_name} near {location}");
            for token in tokens {
                if let Err(err) = sender.send(&token, title, &body).await {
                    tracing::warn!(error = %err, "Recipient push failed");
                }
            }
        }
        NotifyEvent::FoodClaimed {
            donor_id,
            claimant_label,
            food_name,
        } => {
            let donor = match users.find(&donor_id).await {
                Ok(donor) => donor,
                Err(err) => {
                    tracing::warn!(error = %err, donor_id = %donor_id, "Donor lookup failed");
                    return;
                }
            };

            // No token registered is not an error, just a skipped send.
            let Some(token) = donor.and_then(|d| d.fcm_token) else {
                tracing::debug!(donor_id = %donor_id, "Donor has no push token, skipping");
                return;
            };

            let body = format!("{claimant_label} claimed your {food_name}");
            if let Err(err) = sender.send(&token, "Your food was claimed", &body).await {
                tracing::warn!(error = %err, donor_id = %donor_id, "Donor push failed");
            }
        }
    }
}
