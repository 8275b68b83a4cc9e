//! Integration tests for [`storage::SqliteMessageStore`].
//!
//! Runs every operation against a file-backed SQLite database in a temporary
//! directory: round trip, listing projection, pagination, idempotent deletes,
//! not-found signaling, duplicate ids, persistence and connection failures.

use std::collections::BTreeMap;

use message_core::{Content, Message, MessageSummary, MimeBody, Path, RawMessage};
use storage::{MessageStore, SqliteMessageStore, StoreConfig, StoreError};
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> StoreConfig {
    let path = dir.path().join("messages.db");
    StoreConfig::new(path.to_string_lossy().to_string(), "mailhog", "messages")
}

async fn open_store(dir: &TempDir) -> SqliteMessageStore {
    SqliteMessageStore::connect(&file_config(dir))
        .await
        .expect("Failed to create store")
}

fn message_with_id(id: &str) -> Message {
    let mut headers = BTreeMap::new();
    headers.insert("Subject".to_string(), vec![format!("Message {}", id)]);
    headers.insert(
        "Received".to_string(),
        vec!["from mx1".to_string(), "from mx2".to_string()],
    );
    let mut message = Message::new(
        Path::from_address("sender@example.com"),
        vec![Path::from_address("rcpt@example.org")],
        Content::new(headers, format!("Body of {}", id)),
    );
    message.id = id.to_string();
    message.mime = Some(MimeBody {
        parts: vec![Content::new(BTreeMap::new(), "text part".to_string())],
    });
    message.raw = Some(RawMessage {
        from: "sender@example.com".to_string(),
        to: vec!["rcpt@example.org".to_string()],
        data: format!("Subject: Message {}\r\n\r\nBody of {}", id, id),
        helo: "mx.example.com".to_string(),
    });
    message
}

async fn store_ids(store: &SqliteMessageStore, ids: &[&str]) {
    for id in ids {
        store
            .store(message_with_id(id))
            .await
            .expect("Failed to store message");
    }
}

/// **Test: Store then load returns the same message, body included.**
#[tokio::test]
async fn test_store_then_load_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&dir).await;
    let message = message_with_id("round-trip");

    let id = store
        .store(message.clone())
        .await
        .expect("Failed to store message");
    let loaded = store.load(&id).await.expect("Failed to load message");

    assert_eq!(id, "round-trip");
    assert_eq!(loaded, message);
}

/// **Test: Listing returns the static projection, without body content.**
///
/// **Setup:** Store three messages with bodies, MIME parts and raw data.
/// **Action:** `list(0, 10)`.
/// **Expected:** Summaries equal `MessageSummary::from(stored)`, in insertion order.
#[tokio::test]
async fn test_list_returns_summaries_in_insertion_order() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&dir).await;
    let messages: Vec<Message> = ["c", "a", "b"].iter().map(|id| message_with_id(id)).collect();
    for message in &messages {
        store
            .store(message.clone())
            .await
            .expect("Failed to store message");
    }

    let listed = store.list(0, 10).await.expect("Failed to list messages");

    let expected: Vec<MessageSummary> = messages.iter().map(MessageSummary::from).collect();
    assert_eq!(listed, expected);
}

/// **Test: Pagination bounds over every start/limit pair.**
#[tokio::test]
async fn test_list_pagination_bounds() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&dir).await;
    store_ids(&store, &["m0", "m1", "m2", "m3"]).await;
    let total = 4usize;

    for start in 0..=6 {
        for limit in 0..=5 {
            let page = store.list(start, limit).await.expect("Failed to list messages");
            assert_eq!(
                page.len(),
                limit.min(total.saturating_sub(start)),
                "start={} limit={}",
                start,
                limit
            );
            if let Some(first) = page.first() {
                assert_eq!(first.id, format!("m{}", start));
            }
        }
    }

    assert!(store.list(total, usize::MAX).await.expect("Failed to list").is_empty());
}

/// **Test: Duplicate id is rejected and the original document kept.**
#[tokio::test]
async fn test_store_rejects_duplicate_id() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&dir).await;
    store_ids(&store, &["dup"]).await;

    let mut second = message_with_id("dup");
    second.content.body = "replacement".to_string();
    let err = store.store(second).await.unwrap_err();

    assert_eq!(err, StoreError::AlreadyExists("dup".to_string()));
    let loaded = store.load("dup").await.expect("Failed to load message");
    assert_eq!(loaded.content.body, "Body of dup");
    assert_eq!(store.count().await.expect("Failed to count"), 1);
}

/// **Test: Empty id is assigned by the backend.**
#[tokio::test]
async fn test_store_assigns_id_when_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&dir).await;

    let id = store
        .store(message_with_id(""))
        .await
        .expect("Failed to store message");

    assert!(!id.is_empty());
    assert_eq!(store.load(&id).await.expect("Failed to load message").id, id);
}

/// **Test: delete_one on a missing id succeeds, twice in a row.**
#[tokio::test]
async fn test_delete_one_is_idempotent() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&dir).await;
    store_ids(&store, &["keep", "drop"]).await;

    store.delete_one("drop").await.expect("Failed to delete message");
    store.delete_one("drop").await.expect("Second delete failed");
    store.delete_one("never-there").await.expect("Delete of missing id failed");

    assert_eq!(store.count().await.expect("Failed to count"), 1);
    assert!(store.load("keep").await.is_ok());
}

/// **Test: delete_all clears everything and can be repeated.**
#[tokio::test]
async fn test_delete_all_clears() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&dir).await;
    store_ids(&store, &["a", "b", "c"]).await;

    store.delete_all().await.expect("Failed to delete all");
    store.delete_all().await.expect("Failed to delete all again");

    for limit in [0, 1, 3, 100] {
        assert!(store.list(0, limit).await.expect("Failed to list").is_empty());
    }
    assert_eq!(store.count().await.expect("Failed to count"), 0);
}

/// **Test: Store a, b, c; page; delete b; list and load again.**
#[tokio::test]
async fn test_store_list_delete_scenario() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&dir).await;
    let messages: Vec<Message> = ["a", "b", "c"].iter().map(|id| message_with_id(id)).collect();
    for message in &messages {
        store
            .store(message.clone())
            .await
            .expect("Failed to store message");
    }

    let page = store.list(1, 1).await.expect("Failed to list messages");
    assert_eq!(page, vec![MessageSummary::from(&messages[1])]);

    store.delete_one("b").await.expect("Failed to delete message");

    let ids: Vec<String> = store
        .list(0, 10)
        .await
        .expect("Failed to list messages")
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec!["a".to_string(), "c".to_string()]);

    let err = store.load("b").await.unwrap_err();
    assert!(err.is_not_found());
}

/// **Test: Messages survive closing and reopening the database file.**
#[tokio::test]
async fn test_messages_persist_across_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let message = message_with_id("durable");
    {
        let store = open_store(&dir).await;
        store
            .store(message.clone())
            .await
            .expect("Failed to store message");
        store.close().await;
    }

    let reopened = open_store(&dir).await;

    assert_eq!(reopened.load("durable").await.expect("Failed to load"), message);
    assert_eq!(reopened.count().await.expect("Failed to count"), 1);
}

/// **Test: Two collections in one database file do not see each other.**
#[tokio::test]
async fn test_collections_are_independent() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("shared.db").to_string_lossy().to_string();
    let inbox = SqliteMessageStore::connect(&StoreConfig::new(path.clone(), "mailhog", "inbox"))
        .await
        .expect("Failed to create inbox store");
    let archive = SqliteMessageStore::connect(&StoreConfig::new(path, "mailhog", "archive"))
        .await
        .expect("Failed to create archive store");

    store_ids(&inbox, &["x"]).await;

    assert_eq!(inbox.count().await.expect("Failed to count"), 1);
    assert_eq!(archive.count().await.expect("Failed to count"), 0);
    assert!(archive.load("x").await.unwrap_err().is_not_found());
}

/// **Test: An unreachable database path is a connection error.**
///
/// **Setup:** A path whose parent directory does not exist.
/// **Expected:** `connect` returns `StoreError::Connection` and no store.
#[tokio::test]
async fn test_connect_unreachable_path_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("missing").join("nested").join("messages.db");
    let config = StoreConfig::new(path.to_string_lossy().to_string(), "mailhog", "messages");

    let result = SqliteMessageStore::connect(&config).await;

    assert!(matches!(result, Err(StoreError::Connection(_))));
}

/// **Test: Concurrent stores through clones of one store all land.**
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_stores_share_one_pool() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&dir).await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.store(message_with_id(&format!("id-{}", i))).await
        }));
    }
    for handle in handles {
        handle
            .await
            .expect("Task panicked")
            .expect("Failed to store message");
    }

    assert_eq!(store.count().await.expect("Failed to count"), 16);
}
