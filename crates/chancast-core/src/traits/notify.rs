//! Downstream notification sink interfaces.
//!
//! Webhook and push delivery are external collaborators. The core invokes
//! them fire-and-forget; failures are handled (and logged) inside the
//! implementations and never observed by the core.

use async_trait::async_trait;

use crate::types::message::ChannelMessage;

/// Action label attached to webhook notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookAction {
    /// A message was created (live or promoted).
    Create,
    /// A message was edited.
    Update,
    /// A message was deleted.
    Delete,
}

impl WebhookAction {
    /// Return the action as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Outbound webhook delivery.
#[async_trait]
pub trait WebhookNotifier: Send + Sync {
    /// Deliver a webhook for the given action and message.
    async fn notify(&self, action: WebhookAction, message: &ChannelMessage);
}

/// Push-notification delivery.
#[async_trait]
pub trait PushNotifier: Send + Sync {
    /// Deliver a push notification for the given message.
    async fn notify(&self, message: &ChannelMessage);
}
