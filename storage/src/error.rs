//! Mapping from driver and codec errors to [`StoreError`].
//!
//! Used by `SqliteMessageStore`; callers only ever see `StoreError`.

use message_core::StoreError;

/// Construction-time failure: the store must not be returned.
pub(crate) fn connection_error(err: sqlx::Error) -> StoreError {
    StoreError::Connection(err.to_string())
}

/// Any failure of a read or delete.
pub(crate) fn storage_error(err: sqlx::Error) -> StoreError {
    StoreError::Storage(err.to_string())
}

/// Failure of an insert; a unique-constraint hit on `id` is a duplicate message.
pub(crate) fn write_error(id: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::AlreadyExists(id.to_string())
        }
        _ => storage_error(err),
    }
}

/// A stored document that no longer decodes, or a message that cannot be encoded.
pub(crate) fn codec_error(err: serde_json::Error) -> StoreError {
    StoreError::Storage(format!("Document codec error: {}", err))
}
