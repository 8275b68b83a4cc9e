//! # In-Memory Message Store
//!
//! This crate provides an in-memory implementation of the `MessageStore` trait
//! from the `message-core` crate.
//!
//! ## InMemoryMessageStore
//!
//! Messages are kept in a `Vec` in insertion order, which is also the listing
//! order.
//!
//! **Limitations**:
//! - Data is lost on restart
//! - Limited by available memory
//! - `delete_one` and `load` scan linearly
//!
//! ## Example
//!
//! ```rust
//! use message_inmemory::InMemoryMessageStore;
//! use message_core::{Content, Message, MessageStore, Path};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), message_core::StoreError> {
//!     let store = InMemoryMessageStore::new();
//!
//!     let message = Message::new(
//!         Path::from_address("alice@example.com"),
//!         vec![Path::from_address("bob@example.org")],
//!         Content::new(Default::default(), "Hello".to_string()),
//!     );
//!     let id = store.store(message).await?;
//!     assert_eq!(store.load(&id).await?.content.body, "Hello");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Thread Safety
//!
//! The store uses `Arc<RwLock<>>`; clones share the same messages.

use async_trait::async_trait;
use message_core::{generate_id, Message, MessageStore, Messages, StoreError, DEFAULT_ID_HOST};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory message store.
#[derive(Debug, Clone)]
pub struct InMemoryMessageStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl InMemoryMessageStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn store(&self, mut message: Message) -> Result<String, StoreError> {
        if message.id.is_empty() {
            message.id = generate_id(DEFAULT_ID_HOST);
        }

        let mut messages = self.messages.write().await;
        if messages.iter().any(|m| m.id == message.id) {
            return Err(StoreError::AlreadyExists(message.id));
        }

        let id = message.id.clone();
        messages.push(message);
        debug!(id = %id, total = messages.len(), "Message written to in-memory store");
        Ok(id)
    }

    async fn list(&self, start: usize, limit: usize) -> Result<Messages, StoreError> {
        let messages = self.messages.read().await;
        let page: Messages = messages
            .iter()
            .skip(start)
            .take(limit)
            .map(Message::summary)
            .collect();
        debug!(start, limit, count = page.len(), "In-memory store list returned");
        Ok(page)
    }

    async fn delete_one(&self, id: &str) -> Result<(), StoreError> {
        let mut messages = self.messages.write().await;
        let before = messages.len();
        messages.retain(|m| m.id != id);
        debug!(id = %id, removed = before - messages.len(), "In-memory store delete_one");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let mut messages = self.messages.write().await;
        let removed = messages.len();
        messages.clear();
        debug!(removed, "In-memory store cleared");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Message, StoreError> {
        let messages = self.messages.read().await;
        messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.messages.read().await.len())
    }
}
