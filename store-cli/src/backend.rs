//! Opens the configured message store behind the logging wrapper.

use anyhow::{Context, Result};
use message_core::{LoggingStore, MessageStore};
use message_inmemory::InMemoryMessageStore;
use storage::SqliteMessageStore;
use tracing::info;

use crate::config::{Backend, CliConfig};

/// Returns the selected backend; every error it reports is logged once by `LoggingStore`.
pub async fn open_store(config: &CliConfig) -> Result<Box<dyn MessageStore>> {
    match config.backend {
        Backend::Sqlite => {
            let store = SqliteMessageStore::connect(&config.store)
                .await
                .with_context(|| format!("Failed to connect to message store at {}", config.store.uri))?;
            Ok(Box::new(LoggingStore::new(store)))
        }
        Backend::Memory => {
            info!("Using in-memory message store; messages are not kept after exit");
            Ok(Box::new(LoggingStore::new(InMemoryMessageStore::new())))
        }
    }
}
