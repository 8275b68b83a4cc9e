//! Row model for one stored message.
//!
//! A message is kept as two JSON documents: the full message, and its listing
//! summary so that `list` reads the summary column only.

use message_core::{Message, MessageSummary, StoreError};

use crate::error::codec_error;

#[derive(Debug, Clone)]
pub struct MessageDocument {
    pub id: String,
    pub summary: String,
    pub document: String,
}

impl MessageDocument {
    /// Encodes a message; its id must already be assigned.
    pub fn encode(message: &Message) -> Result<Self, StoreError> {
        Ok(Self {
            id: message.id.clone(),
            summary: serde_json::to_string(&message.summary()).map_err(codec_error)?,
            document: serde_json::to_string(message).map_err(codec_error)?,
        })
    }

    pub fn decode_message(document: &str) -> Result<Message, StoreError> {
        serde_json::from_str(document).map_err(codec_error)
    }

    pub fn decode_summary(summary: &str) -> Result<MessageSummary, StoreError> {
        serde_json::from_str(summary).map_err(codec_error)
    }
}
