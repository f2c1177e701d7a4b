use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use papercast_core::{
    Conversation, Document, DocumentId, IngestionStatus, PodcastStatus, UserId,
};
use papercast_store::error::StoreError;
use papercast_store::store::DocumentStore;

/// In-memory [`DocumentStore`] backed by [`DashMap`]s.
///
/// Conversations are keyed by document id, so the one-conversation-per-
/// document invariant falls out of the map structure: the entry API makes
/// check-then-create atomic.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<String, Document>,
    conversations: DashMap<String, Conversation>,
}

impl MemoryDocumentStore {
    /// Create a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently stored.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of conversations currently stored.
    #[must_use]
    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, document: Document) -> Result<(), StoreError> {
        self.documents
            .insert(document.id.as_str().to_owned(), document);
        Ok(())
    }

    async fn document(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.get(id.as_str()).map(|entry| entry.clone()))
    }

    async fn update_ingestion_status(
        &self,
        id: &DocumentId,
        status: IngestionStatus,
    ) -> Result<Document, StoreError> {
        let mut entry = self
            .documents
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_owned()))?;

        if !entry.ingestion_status.can_transition_to(status) {
            return Err(StoreError::IllegalIngestionTransition {
                from: entry.ingestion_status,
                to: status,
            });
        }

        entry.ingestion_status = status;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn update_podcast_status(
        &self,
        id: &DocumentId,
        status: PodcastStatus,
        podcast_url: Option<String>,
    ) -> Result<Document, StoreError> {
        let mut entry = self
            .documents
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_owned()))?;

        if !entry.podcast_status.can_transition_to(status) {
            return Err(StoreError::IllegalPodcastTransition {
                from: entry.podcast_status,
                to: status,
            });
        }

        entry.podcast_status = status;
        if let Some(url) = podcast_url {
            entry.podcast_url = Some(url);
        }
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn create_conversation_if_absent(
        &self,
        user_id: &UserId,
        document_id: &DocumentId,
        title: &str,
    ) -> Result<Conversation, StoreError> {
        let conversation = self
            .conversations
            .entry(document_id.as_str().to_owned())
            .or_insert_with(|| Conversation::new(user_id.clone(), document_id.clone(), title))
            .clone();
        Ok(conversation)
    }

    async fn conversation_for_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Option<Conversation>, StoreError> {
        Ok(self
            .conversations
            .get(document_id.as_str())
            .map(|entry| entry.clone()))
    }

    async fn conversations_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, StoreError> {
        let mut result: Vec<Conversation> = self
            .conversations
            .iter()
            .filter(|entry| entry.user_id == *user_id)
            .map(|entry| entry.clone())
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_store() -> (MemoryDocumentStore, Document) {
        let store = MemoryDocumentStore::new();
        let doc = Document::new("user-1", "notes.pdf", "https://cdn/notes.pdf");
        store.insert(doc.clone()).await.unwrap();
        (store, doc)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let (store, doc) = seeded_store().await;
        let loaded = store.document(&doc.id).await.unwrap().unwrap();
        assert_eq!(loaded.file_name, "notes.pdf");
        assert_eq!(loaded.ingestion_status, IngestionStatus::Pending);
    }

    #[tokio::test]
    async fn missing_document() {
        let store = MemoryDocumentStore::new();
        let got = store.document(&DocumentId::from("nope")).await.unwrap();
        assert!(got.is_none());

        let err = store
            .update_ingestion_status(&DocumentId::from("nope"), IngestionStatus::Processing)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn ingestion_status_walks_forward() {
        let (store, doc) = seeded_store().await;
        store
            .update_ingestion_status(&doc.id, IngestionStatus::Processing)
            .await
            .unwrap();
        let updated = store
            .update_ingestion_status(&doc.id, IngestionStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.ingestion_status, IngestionStatus::Completed);
    }

    #[tokio::test]
    async fn completed_never_regresses() {
        let (store, doc) = seeded_store().await;
        store
            .update_ingestion_status(&doc.id, IngestionStatus::Processing)
            .await
            .unwrap();
        store
            .update_ingestion_status(&doc.id, IngestionStatus::Completed)
            .await
            .unwrap();

        let err = store
            .update_ingestion_status(&doc.id, IngestionStatus::Processing)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::IllegalIngestionTransition { .. }));

        let loaded = store.document(&doc.id).await.unwrap().unwrap();
        assert_eq!(loaded.ingestion_status, IngestionStatus::Completed);
    }

    #[tokio::test]
    async fn podcast_completed_persists_url() {
        let (store, doc) = seeded_store().await;
        store
            .update_podcast_status(&doc.id, PodcastStatus::Generating, None)
            .await
            .unwrap();
        let updated = store
            .update_podcast_status(
                &doc.id,
                PodcastStatus::Completed,
                Some("https://cdn/podcasts/d.mp3".into()),
            )
            .await
            .unwrap();
        assert_eq!(updated.podcast_status, PodcastStatus::Completed);
        assert_eq!(updated.podcast_url.as_deref(), Some("https://cdn/podcasts/d.mp3"));
    }

    #[tokio::test]
    async fn failed_podcast_can_regenerate() {
        let (store, doc) = seeded_store().await;
        store
            .update_podcast_status(&doc.id, PodcastStatus::Generating, None)
            .await
            .unwrap();
        store
            .update_podcast_status(&doc.id, PodcastStatus::Failed, None)
            .await
            .unwrap();
        let updated = store
            .update_podcast_status(&doc.id, PodcastStatus::Generating, None)
            .await
            .unwrap();
        assert_eq!(updated.podcast_status, PodcastStatus::Generating);
    }

    #[tokio::test]
    async fn one_conversation_per_document() {
        let (store, doc) = seeded_store().await;
        let first = store
            .create_conversation_if_absent(&doc.user_id, &doc.id, &doc.file_name)
            .await
            .unwrap();
        let second = store
            .create_conversation_if_absent(&doc.user_id, &doc.id, &doc.file_name)
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.conversation_count(), 1);
    }

    #[tokio::test]
    async fn conversations_listed_newest_first() {
        let store = MemoryDocumentStore::new();
        let user = UserId::from("user-1");
        for name in ["a.pdf", "b.pdf"] {
            let doc = Document::new(user.clone(), name, format!("/tmp/{name}"));
            store.insert(doc.clone()).await.unwrap();
            store
                .create_conversation_if_absent(&user, &doc.id, name)
                .await
                .unwrap();
        }
        let listed = store.conversations_for_user(&user).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created_at >= listed[1].created_at);
    }
}
