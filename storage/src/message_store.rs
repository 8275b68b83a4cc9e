//! SQLite-backed document collection of messages.
//!
//! Uses SqlitePoolManager and MessageDocument. Each message is one row of the
//! `<database>_<collection>` table; `seq` gives the listing order.

use async_trait::async_trait;
use message_core::{
    generate_id, Message, MessageStore, Messages, StoreError, DEFAULT_ID_HOST,
};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{connection_error, storage_error, write_error};
use crate::models::MessageDocument;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteMessageStore {
    pool_manager: SqlitePoolManager,
    table: String,
}

impl SqliteMessageStore {
    /// Connects to the configured collection, creating its table if missing.
    ///
    /// Fails with [`StoreError::Connection`] when the config is invalid, the
    /// database cannot be opened, or the table cannot be created.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        info!(
            uri = %config.uri,
            database = %config.database,
            collection = %config.collection,
            "Connecting message store"
        );

        let pool_manager = SqlitePoolManager::new(&config.uri)
            .await
            .map_err(connection_error)?;
        let store = Self {
            pool_manager,
            table: config.table_name(),
        };
        store.init().await.map_err(connection_error)?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{}" (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                summary TEXT NOT NULL,
                document TEXT NOT NULL
            )
            "#,
            self.table
        ))
        .execute(self.pool_manager.pool())
        .await?;

        info!(table = %self.table, "Message collection ready");
        Ok(())
    }

    /// Releases the connection pool. Operations after this fail with `Storage`.
    pub async fn close(&self) {
        self.pool_manager.close().await;
    }
}

fn to_sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Converts a `COUNT(*)` result; a value that does not fit `usize` is a backend fault.
pub(crate) fn count_from_sql(count: i64) -> Result<usize, StoreError> {
    usize::try_from(count)
        .map_err(|_| StoreError::Storage(format!("backend returned invalid count {}", count)))
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn store(&self, mut message: Message) -> Result<String, StoreError> {
        if message.id.is_empty() {
            message.id = generate_id(DEFAULT_ID_HOST);
        }
        let doc = MessageDocument::encode(&message)?;

        sqlx::query(&format!(
            r#"INSERT INTO "{}" (id, summary, document) VALUES (?1, ?2, ?3)"#,
            self.table
        ))
        .bind(&doc.id)
        .bind(&doc.summary)
        .bind(&doc.document)
        .execute(self.pool_manager.pool())
        .await
        .map_err(|e| write_error(&doc.id, e))?;

        debug!(id = %doc.id, "Saved message");
        Ok(doc.id)
    }

    async fn list(&self, start: usize, limit: usize) -> Result<Messages, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as(&format!(
            r#"SELECT summary FROM "{}" ORDER BY seq LIMIT ?1 OFFSET ?2"#,
            self.table
        ))
        .bind(to_sql_int(limit))
        .bind(to_sql_int(start))
        .fetch_all(self.pool_manager.pool())
        .await
        .map_err(storage_error)?;

        debug!(start, limit, count = rows.len(), "Retrieved message summaries");
        rows.iter()
            .map(|(summary,)| MessageDocument::decode_summary(summary))
            .collect()
    }

    async fn delete_one(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query(&format!(r#"DELETE FROM "{}" WHERE id = ?1"#, self.table))
            .bind(id)
            .execute(self.pool_manager.pool())
            .await
            .map_err(storage_error)?;

        debug!(id = %id, removed = result.rows_affected(), "Deleted message");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let result = sqlx::query(&format!(r#"DELETE FROM "{}""#, self.table))
            .execute(self.pool_manager.pool())
            .await
            .map_err(storage_error)?;

        info!(removed = result.rows_affected(), "Deleted all messages");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Message, StoreError> {
        let row: Option<(String,)> = sqlx::query_as(&format!(
            r#"SELECT document FROM "{}" WHERE id = ?1"#,
            self.table
        ))
        .bind(id)
        .fetch_optional(self.pool_manager.pool())
        .await
        .map_err(storage_error)?;

        match row {
            Some((document,)) => MessageDocument::decode_message(&document),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let (count,): (i64,) = sqlx::query_as(&format!(r#"SELECT COUNT(*) FROM "{}""#, self.table))
            .fetch_one(self.pool_manager.pool())
            .await
            .map_err(storage_error)?;

        count_from_sql(count)
    }
}
