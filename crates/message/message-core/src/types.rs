//! # Core Types
//!
//! This module defines the message records handled by every storage backend.
//!
//! ## Message
//!
//! A single captured message: SMTP envelope, parsed content, capture time and
//! the optional MIME tree and raw transcript.
//!
//! ## MessageSummary
//!
//! The listing projection of a message. It names its fields explicitly so the
//! listing shape never depends on the backend; body, MIME parts and the raw
//! transcript are left out.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Host part used for generated message ids.
pub const DEFAULT_ID_HOST: &str = "localhost";

/// Generates a new message id of the form `<uuid-v4>@<host>`.
pub fn generate_id(host: &str) -> String {
    format!("{}@{}", Uuid::new_v4(), host)
}

/// An SMTP path (reverse-path or forward-path).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Path {
    /// Source route relays, outermost first
    pub relays: Vec<String>,
    /// Local part of the address
    pub mailbox: String,
    /// Domain part of the address
    pub domain: String,
    /// ESMTP parameters given with the path
    pub params: String,
}

impl Path {
    /// Splits `mailbox@domain` into a path with no relays or params.
    ///
    /// An address without `@` is taken as a bare mailbox.
    pub fn from_address(address: &str) -> Self {
        let (mailbox, domain) = match address.rsplit_once('@') {
            Some((mailbox, domain)) => (mailbox.to_string(), domain.to_string()),
            None => (address.to_string(), String::new()),
        };
        Self {
            relays: Vec::new(),
            mailbox,
            domain,
            params: String::new(),
        }
    }

    /// Returns `mailbox@domain`, or just the mailbox when the domain is empty.
    pub fn address(&self) -> String {
        if self.domain.is_empty() {
            self.mailbox.clone()
        } else {
            format!("{}@{}", self.mailbox, self.domain)
        }
    }
}

/// Parsed message content: headers, body and size.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    /// Header name to its values, in the order they appeared
    pub headers: BTreeMap<String, Vec<String>>,
    /// Message body
    pub body: String,
    /// Size in bytes
    pub size: usize,
    /// Parsed MIME parts, when the message is multipart
    pub mime: Option<MimeBody>,
}

impl Content {
    /// Creates content from headers and body; `size` is the body length in bytes.
    pub fn new(headers: BTreeMap<String, Vec<String>>, body: String) -> Self {
        let size = body.len();
        Self {
            headers,
            body,
            size,
            mime: None,
        }
    }

    /// Returns the first value of a header, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// The parts of a multipart MIME body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MimeBody {
    pub parts: Vec<Content>,
}

/// The SMTP transcript a message was received with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawMessage {
    pub from: String,
    pub to: Vec<String>,
    pub data: String,
    pub helo: String,
}

/// A single captured message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique identifier; empty means "let the backend assign one"
    #[serde(default)]
    pub id: String,
    /// Envelope sender
    pub from: Path,
    /// Envelope recipients
    pub to: Vec<Path>,
    /// Parsed content
    pub content: Content,
    /// When the message was captured
    pub created: DateTime<Utc>,
    /// Parsed MIME tree of the whole message
    pub mime: Option<MimeBody>,
    /// Raw SMTP transcript
    pub raw: Option<RawMessage>,
}

impl Message {
    /// Creates a message with a generated id and the current time.
    pub fn new(from: Path, to: Vec<Path>, content: Content) -> Self {
        Self {
            id: generate_id(DEFAULT_ID_HOST),
            from,
            to,
            content,
            created: Utc::now(),
            mime: None,
            raw: None,
        }
    }

    /// Returns the listing projection of this message.
    pub fn summary(&self) -> MessageSummary {
        MessageSummary::from(self)
    }
}

/// Listing projection of a [`Message`]: identity and metadata, no body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageSummary {
    pub id: String,
    pub from: Path,
    pub to: Vec<Path>,
    pub headers: BTreeMap<String, Vec<String>>,
    pub size: usize,
    pub created: DateTime<Utc>,
}

impl From<&Message> for MessageSummary {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            from: message.from.clone(),
            to: message.to.clone(),
            headers: message.content.headers.clone(),
            size: message.content.size,
            created: message.created,
        }
    }
}

/// Ordered listing result.
pub type Messages = Vec<MessageSummary>;
