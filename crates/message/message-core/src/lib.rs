//! # Message Core
//!
//! Core types and the storage trait for captured messages.
//! Used by the `message-inmemory` and `storage` backends and by `store-cli`.
//!
//! ## Modules
//!
//! - [`types`] - Message, Path, Content, MessageSummary
//! - [`store`] - MessageStore trait
//! - [`error`] - StoreError
//! - [`logging`] - LoggingStore wrapper

pub mod error;
pub mod logging;
pub mod store;
pub mod types;


pub use error::StoreError;
pub use logging::LoggingStore;
pub use store::MessageStore;
pub use types::*;
