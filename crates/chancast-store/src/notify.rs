//! Log-only notification sinks.
//!
//! Webhook and push delivery are external collaborators; these sinks only
//! record that a notification would have been sent. Failures never reach the
//! distribution core.

use async_trait::async_trait;
use tracing::info;

use chancast_core::traits::notify::{PushNotifier, WebhookAction, WebhookNotifier};
use chancast_core::types::message::ChannelMessage;

/// Webhook sink that logs instead of delivering.
#[derive(Debug, Default)]
pub struct LogWebhookNotifier;

impl LogWebhookNotifier {
    /// Create the sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WebhookNotifier for LogWebhookNotifier {
    async fn notify(&self, action: WebhookAction, message: &ChannelMessage) {
        info!(
            action = action.as_str(),
            message_id = message.id,
            "Webhook notification"
        );
    }
}

/// Push-notification sink that logs instead of delivering.
#[derive(Debug, Default)]
pub struct LogPushNotifier;

impl LogPushNotifier {
    /// Create the sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PushNotifier for LogPushNotifier {
    async fn notify(&self, message: &ChannelMessage) {
        info!(message_id = message.id, "Push notification");
    }
}
