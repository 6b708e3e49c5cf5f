//! Tracing-only push sender - used when no push backend is configured.

use async_trait::async_trait;

use mealbridge_core::ports::PushSender;

pub struct LogPushSender;

#[async_trait]
impl PushSender for LogPushSender {
    async fn send(&self, token: &str, title: &str, body: &str) -> Result<(), String> {
        tracing::info!(token = %token, title = %title, body = %body, "Push (log only)");
        Ok(())
    }
}
