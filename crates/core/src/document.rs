//! The document record and its two independent status machines.
//!
//! `ingestion_status` and `podcast_status` are disjoint fields mutated by
//! different pipelines; neither machine ever moves backward. The transition
//! predicates here are the single source of truth; stores enforce them on
//! every write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{DocumentId, IndexName, SourceLocation, UserId};

/// Lifecycle of the ingestion (parse + index) pipeline for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngestionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl IngestionStatus {
    /// Whether moving from `self` to `next` is an allowed transition.
    ///
    /// `Processing -> Processing` is permitted so that a redelivered job
    /// re-entering the pipeline does not trip the store-side guard.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Processing, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        )
    }

    /// Whether this status is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Lifecycle of podcast generation for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PodcastStatus {
    None,
    Generating,
    Completed,
    Failed,
}

impl PodcastStatus {
    /// Whether moving from `self` to `next` is an allowed transition.
    ///
    /// Unlike ingestion, `Failed -> Generating` is allowed: a failed
    /// podcast may be re-requested by the user. `Completed` is final.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::None, Self::Generating)
                | (Self::Failed, Self::Generating)
                | (Self::Generating, Self::Generating)
                | (Self::Generating, Self::Completed)
                | (Self::Generating, Self::Failed)
        )
    }

    /// Whether a new podcast request for a document in this status should
    /// be admitted. Requests while generating or already completed are
    /// rejected with the current status instead of enqueueing.
    #[must_use]
    pub fn admits_new_request(self) -> bool {
        matches!(self, Self::None | Self::Failed)
    }
}

/// One uploaded source file and its derived processing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier, assigned at creation.
    pub id: DocumentId,

    /// Owning user.
    pub user_id: UserId,

    /// Original file name of the upload.
    pub file_name: String,

    /// Where the raw bytes live (URL or local path).
    pub source_location: SourceLocation,

    /// Ingestion pipeline status.
    pub ingestion_status: IngestionStatus,

    /// Handle of the document's derived search index. Assigned once at
    /// creation, never changed afterward.
    pub index_name: IndexName,

    /// Podcast pipeline status.
    pub podcast_status: PodcastStatus,

    /// Public URL of the generated audio artifact, set when the podcast
    /// pipeline completes.
    pub podcast_url: Option<String>,

    /// Timestamp when the document was created.
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last status mutation.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document in `Pending` ingestion status with a freshly
    /// generated index handle.
    #[must_use]
    pub fn new(
        user_id: impl Into<UserId>,
        file_name: impl Into<String>,
        source_location: impl Into<SourceLocation>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(Uuid::new_v4().to_string()),
            user_id: user_id.into(),
            file_name: file_name.into(),
            source_location: source_location.into(),
            ingestion_status: IngestionStatus::Pending,
            index_name: IndexName::new(Uuid::new_v4().simple().to_string()),
            podcast_status: PodcastStatus::None,
            podcast_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingestion_forward_transitions() {
        use IngestionStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Failed));
        assert!(Processing.can_transition_to(Processing));
    }

    #[test]
    fn ingestion_never_moves_backward() {
        use IngestionStatus::*;
        assert!(!Completed.can_transition_to(Processing));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Failed.can_transition_to(Processing));
        assert!(!Failed.can_transition_to(Pending));
        assert!(!Processing.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Failed));
    }

    #[test]
    fn ingestion_terminal_states() {
        assert!(IngestionStatus::Completed.is_terminal());
        assert!(IngestionStatus::Failed.is_terminal());
        assert!(!IngestionStatus::Pending.is_terminal());
        assert!(!IngestionStatus::Processing.is_terminal());
    }

    #[test]
    fn podcast_transitions() {
        use PodcastStatus::*;
        assert!(None.can_transition_to(Generating));
        assert!(Generating.can_transition_to(Completed));
        assert!(Generating.can_transition_to(Failed));
        assert!(Failed.can_transition_to(Generating));
        assert!(!Completed.can_transition_to(Generating));
        assert!(!None.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Failed));
    }

    #[test]
    fn podcast_admission_rule() {
        assert!(PodcastStatus::None.admits_new_request());
        assert!(PodcastStatus::Failed.admits_new_request());
        assert!(!PodcastStatus::Generating.admits_new_request());
        assert!(!PodcastStatus::Completed.admits_new_request());
    }

    #[test]
    fn new_document_defaults() {
        let doc = Document::new("user-1", "notes.pdf", "https://cdn.example.com/notes.pdf");
        assert_eq!(doc.ingestion_status, IngestionStatus::Pending);
        assert_eq!(doc.podcast_status, PodcastStatus::None);
        assert!(doc.podcast_url.is_none());
        assert!(!doc.index_name.as_str().is_empty());
    }

    #[test]
    fn index_names_are_unique() {
        let a = Document::new("u", "a.pdf", "/tmp/a.pdf");
        let b = Document::new("u", "b.pdf", "/tmp/b.pdf");
        assert_ne!(a.index_name, b.index_name);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn status_serde_wire_format() {
        let json = serde_json::to_string(&IngestionStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");
        let back: PodcastStatus = serde_json::from_str("\"GENERATING\"").unwrap();
        assert_eq!(back, PodcastStatus::Generating);
    }
}
