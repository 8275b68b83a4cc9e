mod message_document;

pub use message_document::MessageDocument;
