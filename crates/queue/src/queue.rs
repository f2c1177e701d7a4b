use async_trait::async_trait;

use papercast_core::Job;

use crate::error::QueueError;

/// One delivery of a job to a consumer.
///
/// The receipt identifies this particular delivery; `attempt` counts how
/// many times the job has been handed out (1 on first delivery).
#[derive(Debug, Clone)]
pub struct Delivery {
    /// The delivered job.
    pub job: Job,
    /// Opaque receipt used to ack or nack this delivery.
    pub receipt: String,
    /// Delivery attempt number, starting at 1.
    pub attempt: u32,
}

/// A durable, at-least-once channel of typed job payloads.
///
/// A job may be delivered more than once (redelivery after a lost ack,
/// crash-restart, or an explicit `nack`); consumers must be idempotent.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue a job for later delivery.
    async fn enqueue(&self, job: Job) -> Result<(), QueueError>;

    /// Wait for and take the next job. Returns [`QueueError::Closed`] once
    /// the queue is closed and drained.
    async fn dequeue(&self) -> Result<Delivery, QueueError>;

    /// Acknowledge a delivery as processed. The job will not be delivered
    /// again. Business failures are still acked; the failure lives in the
    /// document's status, not in the queue.
    async fn ack(&self, delivery: &Delivery) -> Result<(), QueueError>;

    /// Return an in-flight delivery to the queue for redelivery with an
    /// incremented attempt count.
    async fn nack(&self, delivery: &Delivery) -> Result<(), QueueError>;
}
