use thiserror::Error;

/// Top-level error type carried across the admission boundary, where
/// store and queue failures meet.
#[derive(Debug, Error)]
pub enum PapercastError {
    #[error("store error: {0}")]
    Store(String),

    #[error("queue error: {0}")]
    Queue(String),
}
