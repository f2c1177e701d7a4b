//! The status read path.
//!
//! A pure projection of current store fields into client-visible status
//! responses. No caching, no side effects: a poller sees exactly what the
//! pipelines have checkpointed so far, and may observe PROCESSING one
//! moment and COMPLETED the next.

use std::sync::Arc;

use serde::Serialize;

use papercast_core::{DocumentId, IngestionStatus, PodcastStatus};

use crate::error::StoreError;
use crate::store::DocumentStore;

/// Client-visible ingestion status of a document.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionStatusView {
    pub status: IngestionStatus,
}

/// Client-visible podcast status of a document, including the artifact URL
/// once generation has completed.
#[derive(Debug, Clone, Serialize)]
pub struct PodcastStatusView {
    pub status: PodcastStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_url: Option<String>,
}

/// Maps current document fields to status responses.
pub struct StatusProjector {
    store: Arc<dyn DocumentStore>,
}

impl StatusProjector {
    /// Create a projector over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Current ingestion status of `id`, or `None` for an unknown document.
    pub async fn ingestion_status(
        &self,
        id: &DocumentId,
    ) -> Result<Option<IngestionStatusView>, StoreError> {
        Ok(self.store.document(id).await?.map(|doc| IngestionStatusView {
            status: doc.ingestion_status,
        }))
    }

    /// Current podcast status and artifact URL of `id`, or `None` for an
    /// unknown document.
    pub async fn podcast_status(
        &self,
        id: &DocumentId,
    ) -> Result<Option<PodcastStatusView>, StoreError> {
        Ok(self.store.document(id).await?.map(|doc| PodcastStatusView {
            status: doc.podcast_status,
            podcast_url: doc.podcast_url,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn podcast_view_omits_null_url() {
        let view = PodcastStatusView {
            status: PodcastStatus::Generating,
            podcast_url: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json, serde_json::json!({"status": "GENERATING"}));
    }

    #[test]
    fn podcast_view_includes_url_when_set() {
        let view = PodcastStatusView {
            status: PodcastStatus::Completed,
            podcast_url: Some("https://cdn/podcasts/d.mp3".into()),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["podcast_url"], "https://cdn/podcasts/d.mp3");
    }
}
