use thiserror::Error;

use papercast_core::{IngestionStatus, PodcastStatus};

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("illegal ingestion transition: {from:?} -> {to:?}")]
    IllegalIngestionTransition {
        from: IngestionStatus,
        to: IngestionStatus,
    },

    #[error("illegal podcast transition: {from:?} -> {to:?}")]
    IllegalPodcastTransition {
        from: PodcastStatus,
        to: PodcastStatus,
    },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),
}
