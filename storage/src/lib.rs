//! Storage crate: the SQLite document-collection backend for messages.
//!
//! ## Modules
//!
//! - [`config`] – StoreConfig (URI, database, collection)
//! - `error` – sqlx / serde_json error mapping to `StoreError`
//! - `models` – MessageDocument row model
//! - [`message_store`] – SqliteMessageStore
//! - [`sqlite_pool`] – SqlitePoolManager

pub mod config;
mod error;
pub mod message_store;
mod models;
pub mod sqlite_pool;


pub use config::StoreConfig;
pub use message_core::{MessageStore, StoreError};
pub use message_store::SqliteMessageStore;
pub use sqlite_pool::SqlitePoolManager;
