//! Push delivery through the notification edge function.
//!
//! The edge function sits in front of the actual push service; we POST
//! one JSON payload per device token with a bearer service token.

use async_trait::async_trait;
use serde_json::json;

use mealbridge_core::ports::PushSender;

#[derive(Debug, Clone)]
pub struct EdgePushConfig {
    /// Edge function endpoint.
    pub url: String,
    /// Service token sent as `Authorization: Bearer ...`.
    pub service_token: String,
}

pub struct EdgePushSender {
    config: EdgePushConfig,
    client: reqwest::Client,
}

impl EdgePushSender {
    pub fn new(config: EdgePushConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PushSender for EdgePushSender {
    async fn send(&self, token: &str, title: &str, body: &str) -> Result<(), String> {
        let payload = json!({
            "token": token,
            "title": title,
            "body": body,
        });

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(&self.config.service_token)
            .json(&payload)
            .send()
            .await
            .map_err(|err| err.to_string())?;

        if !response.status().is_success() {
            return Err(format!("edge function returned {}", response.status()));
        }

        tracing::debug!(status = %response.status(), "Push delivered via edge function");
        Ok(())
    }
}
