//! # Message Storage
//!
//! This module defines the storage interface for captured messages.
//!
//! The `MessageStore` trait is implemented by storage backends (in-memory,
//! SQLite document collection). Callers hold a backend behind the trait and
//! never depend on which one they got.
//!
//! ## Ordering
//!
//! `list` pages through messages in insertion order, oldest first.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{Message, Messages};

/// Trait for storing, listing, loading and deleting messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Stores a message and returns its id.
    ///
    /// A message with an empty id is assigned a new one. Fails with
    /// [`StoreError::AlreadyExists`] when the id is already stored.
    async fn store(&self, message: Message) -> Result<String, StoreError>;

    /// Returns up to `limit` summaries starting at offset `start`.
    ///
    /// An offset past the end yields an empty list.
    async fn list(&self, start: usize, limit: usize) -> Result<Messages, StoreError>;

    /// Deletes the message with the given id. Deleting a missing id succeeds.
    async fn delete_one(&self, id: &str) -> Result<(), StoreError>;

    /// Deletes every stored message.
    async fn delete_all(&self) -> Result<(), StoreError>;

    /// Loads the full message with the given id, or [`StoreError::NotFound`].
    async fn load(&self, id: &str) -> Result<Message, StoreError>;

    /// Returns the number of stored messages.
    async fn count(&self) -> Result<usize, StoreError>;
}
