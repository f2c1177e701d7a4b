use thiserror::Error;

/// Errors from job queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue has been closed; no further deliveries will arrive.
    #[error("queue closed")]
    Closed,

    /// The receipt does not correspond to an in-flight delivery.
    #[error("unknown delivery receipt: {0}")]
    UnknownReceipt(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("backend error: {0}")]
    Backend(String),
}
