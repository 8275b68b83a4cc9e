//! Connection settings for the SQLite document store. Loaded from env.

use std::env;

use message_core::StoreError;

/// Where the message collection lives.
///
/// | Field | Env var | Default |
/// |-------|---------|---------|
/// | `uri` | `MESSAGE_STORE_URI` | `sqlite://messages.db` |
/// | `database` | `MESSAGE_STORE_DATABASE` | `mailhog` |
/// | `collection` | `MESSAGE_STORE_COLLECTION` | `messages` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite URL (`sqlite://path`, `sqlite::memory:`) or plain file path
    pub uri: String,
    /// Logical database name; prefixes the collection table
    pub database: String,
    /// Collection name
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "sqlite://messages.db".to_string(),
            database: "mailhog".to_string(),
            collection: "messages".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// Load from environment variables, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: env::var("MESSAGE_STORE_URI").unwrap_or(defaults.uri),
            database: env::var("MESSAGE_STORE_DATABASE").unwrap_or(defaults.database),
            collection: env::var("MESSAGE_STORE_COLLECTION").unwrap_or(defaults.collection),
        }
    }

    /// Database and collection names must be non-empty `[A-Za-z0-9_]` identifiers.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.uri.trim().is_empty() {
            return Err(StoreError::Connection("store URI is empty".to_string()));
        }
        for (label, name) in [("database", &self.database), ("collection", &self.collection)] {
            if !is_identifier(name) {
                return Err(StoreError::Connection(format!(
                    "invalid {} name '{}': use letters, digits and underscores",
                    label, name
                )));
            }
        }
        Ok(())
    }

    /// Table holding the collection: `<database>_<collection>`.
    pub fn table_name(&self) -> String {
        format!("{}_{}", self.database, self.collection)
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
