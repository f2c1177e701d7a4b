use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ConversationId, DocumentId, UserId};

/// A chat context bound to exactly one successfully ingested document.
///
/// Created only as a side effect of the ingestion pipeline reaching
/// `COMPLETED`; at most one exists per document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: ConversationId,

    /// Owning user.
    pub user_id: UserId,

    /// The document this conversation is scoped to.
    pub document_id: DocumentId,

    /// Display title, taken from the document's original file name.
    pub title: String,

    /// Timestamp when the conversation was created.
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation for a document.
    #[must_use]
    pub fn new(
        user_id: impl Into<UserId>,
        document_id: impl Into<DocumentId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: ConversationId::new(Uuid::new_v4().to_string()),
            user_id: user_id.into(),
            document_id: document_id.into(),
            title: title.into(),
            created_at: Utc::now(),
        }
    }
}

/// Role of a message author within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One turn in a conversation. Messages are totally ordered by
/// `created_at`; the assistant reply for a user message is always created
/// strictly after it. The pipelines never write messages; this type exists
/// for the data model's referential completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Owning conversation.
    pub conversation_id: ConversationId,

    /// Author role.
    pub role: MessageRole,

    /// Text content of the turn.
    pub content: String,

    /// Timestamp when the message was created.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message in a conversation.
    #[must_use]
    pub fn new(
        conversation_id: impl Into<ConversationId>,
        role: MessageRole,
        content: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_creation() {
        let conv = Conversation::new("user-1", "doc-1", "notes.pdf");
        assert_eq!(conv.user_id.as_str(), "user-1");
        assert_eq!(conv.document_id.as_str(), "doc-1");
        assert_eq!(conv.title, "notes.pdf");
    }

    #[test]
    fn message_role_wire_format() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let back: MessageRole = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(back, MessageRole::User);
    }

    #[test]
    fn messages_order_by_creation_time() {
        let conv = Conversation::new("u", "d", "t");
        let question = Message::new(conv.id.clone(), MessageRole::User, "what is this about?");
        let answer = Message::new(conv.id.clone(), MessageRole::Assistant, "a summary.");
        assert!(answer.created_at >= question.created_at);
    }
}
