//! Scheduled-message promotion.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time;
use tracing::{debug, info, warn};

use chancast_core::traits::notify::{PushNotifier, WebhookAction, WebhookNotifier};
use chancast_core::traits::storage::{MessageStore, ScheduledStore};
use chancast_core::types::message::{ChannelMessage, SCHEDULED_AUTHOR, SCHEDULED_AUTHOR_ID};
use chancast_realtime::push::PushKind;
use chancast_realtime::router::EventRouter;

/// Promotes due scheduled messages into the live stream.
///
/// On each tick: load the full pending set, partition by due time, promote
/// every due message in its own task, and save the not-due remainder back
/// wholesale under a version guard. A failed load skips the whole tick; a
/// failure in one promotion never affects another.
pub struct ScheduledPromoter {
    /// Durable message storage.
    messages: Arc<dyn MessageStore>,
    /// Pending scheduled-set storage.
    scheduled: Arc<dyn ScheduledStore>,
    /// Fan-out router.
    router: Arc<EventRouter>,
    /// Webhook sink.
    webhook: Arc<dyn WebhookNotifier>,
    /// Push-notification sink.
    push: Arc<dyn PushNotifier>,
    /// Timeout per persistence call.
    persist_timeout: Duration,
}

impl fmt::Debug for ScheduledPromoter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledPromoter").finish()
    }
}

impl ScheduledPromoter {
    /// Create the promoter.
    pub fn new(
        messages: Arc<dyn MessageStore>,
        scheduled: Arc<dyn ScheduledStore>,
        router: Arc<EventRouter>,
        webhook: Arc<dyn WebhookNotifier>,
        push: Arc<dyn PushNotifier>,
        persist_timeout: Duration,
    ) -> Self {
        Self {
            messages,
            scheduled,
            router,
            webhook,
            push,
            persist_timeout,
        }
    }

    /// Run one promotion tick.
    pub async fn run_tick(self: Arc<Self>) {
        let pending = match time::timeout(self.persist_timeout, self.scheduled.load_pending()).await
        {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to load pending scheduled messages, skipping tick");
                return;
            }
            Err(_) => {
                warn!("Timed out loading pending scheduled messages, skipping tick");
                return;
            }
        };

        let now = Utc::now();
        let (due, remaining): (Vec<ChannelMessage>, Vec<ChannelMessage>) =
            pending.messages.into_iter().partition(|m| m.is_due(now));

        if due.is_empty() {
            return;
        }

        info!(
            due = due.len(),
            remaining = remaining.len(),
            "Promoting due scheduled messages"
        );

        // Each promotion runs in its own task so one slow persistence call
        // cannot delay the others or the next tick.
        for message in due {
            let promoter = Arc::clone(&self);
            tokio::spawn(async move { promoter.promote(message).await });
        }

        match time::timeout(
            self.persist_timeout,
            self.scheduled.save_pending(remaining, pending.version),
        )
        .await
        {
            Ok(Ok(true)) => {}
            Ok(Ok(false)) => {
                warn!("Pending scheduled set changed during tick, save rejected");
            }
            Ok(Err(e)) => warn!(error = %e, "Failed to save pending scheduled set"),
            Err(_) => warn!("Timed out saving pending scheduled set"),
        }
    }

    /// Promote one due message: fresh identity, "now" timestamp, system
    /// authorship, persist, fan out to non-writers, notify downstream sinks.
    async fn promote(self: Arc<Self>, mut message: ChannelMessage) {
        let id = match time::timeout(self.persist_timeout, self.messages.next_message_id()).await {
            Ok(Ok(id)) => id,
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to allocate id for promoted message");
                return;
            }
            Err(_) => {
                warn!("Timed out allocating id for promoted message");
                return;
            }
        };

        message.id = id;
        message.timestamp = Utc::now();
        message.author = SCHEDULED_AUTHOR.to_string();
        message.author_id = SCHEDULED_AUTHOR_ID.to_string();

        match time::timeout(
            self.persist_timeout,
            self.messages.persist_message(&message, false),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(message_id = id, error = %e, "Failed to persist promoted message");
                return;
            }
            Err(_) => {
                warn!(message_id = id, "Timed out persisting promoted message");
                return;
            }
        }

        self.router.deliver(PushKind::MessageAfterScheduling, &message);

        let webhook = Arc::clone(&self.webhook);
        let webhook_message = message.clone();
        tokio::spawn(async move {
            webhook.notify(WebhookAction::Create, &webhook_message).await;
        });

        let push = Arc::clone(&self.push);
        tokio::spawn(async move {
            push.notify(&message).await;
        });

        debug!(message_id = id, "Scheduled message promoted");
    }
}
