use async_trait::async_trait;

use papercast_core::{
    Conversation, Document, DocumentId, IngestionStatus, PodcastStatus, UserId,
};

use crate::error::StoreError;

/// Durable record store for documents and their derived conversations.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// Status writes **enforce** the transition predicates on
/// [`IngestionStatus`] and [`PodcastStatus`]: a write that is not an
/// allowed transition fails with the corresponding `IllegalTransition`
/// error instead of silently regressing a terminal state. Mid-flight
/// states written here are immediately visible to concurrent readers
/// (status pollers).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a freshly created document.
    async fn insert(&self, document: Document) -> Result<(), StoreError>;

    /// Look up a document by id.
    async fn document(&self, id: &DocumentId) -> Result<Option<Document>, StoreError>;

    /// Move a document's ingestion status, returning the updated record.
    async fn update_ingestion_status(
        &self,
        id: &DocumentId,
        status: IngestionStatus,
    ) -> Result<Document, StoreError>;

    /// Move a document's podcast status, optionally persisting the public
    /// audio URL in the same write (set on `Completed`).
    async fn update_podcast_status(
        &self,
        id: &DocumentId,
        status: PodcastStatus,
        podcast_url: Option<String>,
    ) -> Result<Document, StoreError>;

    /// Create the document's conversation if none exists yet, otherwise
    /// return the existing one. At most one conversation ever exists per
    /// document; this is the redelivery guard for ingestion completion.
    async fn create_conversation_if_absent(
        &self,
        user_id: &UserId,
        document_id: &DocumentId,
        title: &str,
    ) -> Result<Conversation, StoreError>;

    /// The conversation bound to a document, if one exists.
    async fn conversation_for_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Option<Conversation>, StoreError>;

    /// All conversations owned by a user, newest first.
    async fn conversations_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, StoreError>;
}
