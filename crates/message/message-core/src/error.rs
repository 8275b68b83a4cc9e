//! Storage error types.
//!
//! Returned by every [`MessageStore`](crate::MessageStore) implementation.

use thiserror::Error;

/// Errors that can occur when constructing or using a message store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached while constructing the store.
    #[error("Connection error: {0}")]
    Connection(String),
    /// The backend rejected a request or the transport failed mid-operation.
    #[error("Storage error: {0}")]
    Storage(String),
    /// No message has the requested id.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A message with this id is already stored.
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
