//! Logging wrapper for message stores.
//!
//! Backends only return typed errors. `LoggingStore` sits in front of one and
//! reports each failure once before handing it back unchanged.

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use crate::error::StoreError;
use crate::store::MessageStore;
use crate::types::{Message, Messages};

/// Delegates to the wrapped store and logs every error it returns.
///
/// `NotFound` is logged at debug level since callers branch on it; every other
/// error is logged at error level.
#[derive(Debug, Clone)]
pub struct LoggingStore<S> {
    inner: S,
}

impl<S: MessageStore> LoggingStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

fn report(operation: &'static str, err: &StoreError) {
    match err {
        StoreError::NotFound(id) => debug!(operation, id = %id, "Message not found"),
        other => error!(operation, error = %other, "Message store operation failed"),
    }
}

#[async_trait]
impl<S: MessageStore> MessageStore for LoggingStore<S> {
    #[instrument(skip(self, message), fields(id = %message.id))]
    async fn store(&self, message: Message) -> Result<String, StoreError> {
        let result = self.inner.store(message).await;
        match &result {
            Ok(id) => debug!(id = %id, "Message stored"),
            Err(e) => report("store", e),
        }
        result
    }

    #[instrument(skip(self))]
    async fn list(&self, start: usize, limit: usize) -> Result<Messages, StoreError> {
        let result = self.inner.list(start, limit).await;
        match &result {
            Ok(messages) => debug!(count = messages.len(), "Messages listed"),
            Err(e) => report("list", e),
        }
        result
    }

    #[instrument(skip(self))]
    async fn delete_one(&self, id: &str) -> Result<(), StoreError> {
        let result = self.inner.delete_one(id).await;
        if let Err(e) = &result {
            report("delete_one", e);
        }
        result
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> Result<(), StoreError> {
        let result = self.inner.delete_all().await;
        if let Err(e) = &result {
            report("delete_all", e);
        }
        result
    }

    #[instrument(skip(self))]
    async fn load(&self, id: &str) -> Result<Message, StoreError> {
        let result = self.inner.load(id).await;
        if let Err(e) = &result {
            report("load", e);
        }
        result
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<usize, StoreError> {
        let result = self.inner.count().await;
        if let Err(e) = &result {
            report("count", e);
        }
        result
    }
}
