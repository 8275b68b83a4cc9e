//! CLI config: backend choice, store location, logging. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use storage::StoreConfig;


/// Which `MessageStore` implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// SQLite document collection (persistent)
    Sqlite,
    /// Process-local map; every `msgstore` run starts empty and keeps nothing
    Memory,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "memory" => Ok(Backend::Memory),
            other => anyhow::bail!(
                "MESSAGE_STORE_BACKEND must be 'sqlite' or 'memory', got '{}'",
                other
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// MESSAGE_STORE_BACKEND
    pub backend: Backend,
    /// MESSAGE_STORE_URI, MESSAGE_STORE_DATABASE, MESSAGE_STORE_COLLECTION
    pub store: StoreConfig,
    /// LOG_FILE
    pub log_file: String,
}

impl CliConfig {
    /// Load from environment variables. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn load() -> Result<Self> {
        let backend = env::var("MESSAGE_STORE_BACKEND")
            .unwrap_or_else(|_| "sqlite".to_string())
            .parse()?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/msgstore.log".to_string());

        Ok(Self {
            backend,
            store: StoreConfig::from_env(),
            log_file,
        })
    }

    /// Validate store settings; only the SQLite backend uses them.
    pub fn validate(&self) -> Result<()> {
        if self.backend == Backend::Sqlite {
            self.store
                .validate()
                .context("Invalid message store configuration")?;
        }
        Ok(())
    }
}
