use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{DocumentId, IndexName, JobId, SourceLocation};

/// Typed payload of a queued job, tagged on the wire by `type`.
///
/// Unknown tags deserialize to [`JobPayload::Unknown`] so that a consumer
/// running older code acknowledges forward-incompatible jobs as no-ops
/// instead of retrying them forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum JobPayload {
    /// Ingest a source PDF: fetch, parse, index, and open a conversation.
    FileProcessing {
        document_id: DocumentId,
        source_location: SourceLocation,
        index_name: IndexName,
    },
    /// Generate a spoken-word audio artifact summarizing a document.
    PodcastGeneration {
        document_id: DocumentId,
        source_location: SourceLocation,
    },
    /// A job type this consumer does not recognize.
    #[serde(other)]
    Unknown,
}

impl JobPayload {
    /// The document this payload targets, if any.
    #[must_use]
    pub fn document_id(&self) -> Option<&DocumentId> {
        match self {
            Self::FileProcessing { document_id, .. }
            | Self::PodcastGeneration { document_id, .. } => Some(document_id),
            Self::Unknown => None,
        }
    }
}

/// A unit of asynchronous work. Delivery is at-least-once: the same job may
/// reach a worker more than once, so every pipeline must be safe to re-run
/// from the top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,

    /// What to do.
    pub payload: JobPayload,

    /// Timestamp when the job was enqueued.
    pub enqueued_at: DateTime<Utc>,
}

impl Job {
    /// Create a new job with a generated UUID-v4 id.
    #[must_use]
    pub fn new(payload: JobPayload) -> Self {
        Self {
            id: JobId::new(Uuid::new_v4().to_string()),
            payload,
            enqueued_at: Utc::now(),
        }
    }

    /// Build a `file-processing` job.
    #[must_use]
    pub fn file_processing(
        document_id: impl Into<DocumentId>,
        source_location: impl Into<SourceLocation>,
        index_name: impl Into<IndexName>,
    ) -> Self {
        Self::new(JobPayload::FileProcessing {
            document_id: document_id.into(),
            source_location: source_location.into(),
            index_name: index_name.into(),
        })
    }

    /// Build a `podcast-generation` job.
    #[must_use]
    pub fn podcast_generation(
        document_id: impl Into<DocumentId>,
        source_location: impl Into<SourceLocation>,
    ) -> Self {
        Self::new(JobPayload::PodcastGeneration {
            document_id: document_id.into(),
            source_location: source_location.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_processing_wire_format() {
        let job = Job::file_processing("doc-1", "https://cdn/a.pdf", "idx-1");
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["payload"]["type"], "file-processing");
        assert_eq!(json["payload"]["document_id"], "doc-1");
        assert_eq!(json["payload"]["index_name"], "idx-1");
    }

    #[test]
    fn podcast_generation_wire_format() {
        let job = Job::podcast_generation("doc-2", "/tmp/up.pdf");
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["payload"]["type"], "podcast-generation");
        assert_eq!(json["payload"]["source_location"], "/tmp/up.pdf");
    }

    #[test]
    fn job_serde_roundtrip() {
        let job = Job::file_processing("doc-1", "uploads/a.pdf", "idx-9");
        let json = serde_json::to_string(&job).unwrap();
        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, job.id);
        assert_eq!(back.payload.document_id(), job.payload.document_id());
    }

    #[test]
    fn unknown_tag_deserializes_to_unknown() {
        let json = r#"{"type":"reindex-everything","document_id":"doc-1"}"#;
        let payload: JobPayload = serde_json::from_str(json).unwrap();
        assert!(matches!(payload, JobPayload::Unknown));
        assert!(payload.document_id().is_none());
    }
}
