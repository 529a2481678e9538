//! In-memory message store.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use chancast_core::error::AppError;
use chancast_core::result::AppResult;
use chancast_core::traits::storage::MessageStore;
use chancast_core::types::message::ChannelMessage;

/// In-memory message store with a monotonic id counter.
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    /// Last allocated message id.
    last_id: AtomicI64,
    /// Message id → message.
    messages: DashMap<i64, ChannelMessage>,
}

impl MemoryMessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn next_message_id(&self) -> AppResult<i64> {
        Ok(self.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn persist_message(&self, message: &ChannelMessage, is_update: bool) -> AppResult<()> {
        if is_update && !self.messages.contains_key(&message.id) {
            return Err(AppError::not_found(format!(
                "Message {} not found for update",
                message.id
            )));
        }
        self.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn message_by_id(&self, id: i64) -> AppResult<Option<ChannelMessage>> {
        Ok(self.messages.get(&id).map(|entry| entry.value().clone()))
    }

    async fn delete_message(&self, id: i64) -> AppResult<()> {
        match self.messages.get_mut(&id) {
            Some(mut entry) => {
                entry.value_mut().deleted = true;
                Ok(())
            }
            None => Err(AppError::not_found(format!("Message {id} not found"))),
        }
    }
}
