pub mod conversation;
pub mod document;
pub mod error;
pub mod job;
pub mod types;

pub use conversation::{Conversation, Message, MessageRole};
pub use document::{Document, IngestionStatus, PodcastStatus};
pub use error::PapercastError;
pub use job::{Job, JobPayload};
pub use types::{
    ConversationId, DocumentId, IndexName, JobId, SourceKind, SourceLocation, UserId,
};
