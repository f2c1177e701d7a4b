use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Notify;
use uuid::Uuid;

use papercast_core::Job;

use crate::error::QueueError;
use crate::queue::{Delivery, JobQueue};

#[derive(Debug, Clone)]
struct QueuedJob {
    job: Job,
    attempt: u32,
}

/// In-memory [`JobQueue`] for embedding and tests.
///
/// Jobs wait in a `VecDeque`; dequeued jobs move to an in-flight table
/// until acked. A `nack` pushes the job back with an incremented attempt,
/// which is also how tests exercise the at-least-once redelivery path.
#[derive(Debug, Default)]
pub struct MemoryJobQueue {
    ready: Mutex<VecDeque<QueuedJob>>,
    in_flight: DashMap<String, QueuedJob>,
    notify: Notify,
    closed: AtomicBool,
}

impl MemoryJobQueue {
    /// Create a new, empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the queue: once drained, `dequeue` returns
    /// [`QueueError::Closed`]. In-flight deliveries may still be acked.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Number of jobs waiting for delivery.
    pub fn ready_len(&self) -> usize {
        self.ready.lock().expect("queue lock poisoned").len()
    }

    /// Number of delivered-but-unacked jobs.
    #[must_use]
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    fn pop_ready(&self) -> Option<QueuedJob> {
        self.ready.lock().expect("queue lock poisoned").pop_front()
    }
}

#[async_trait]
impl JobQueue for MemoryJobQueue {
    async fn enqueue(&self, job: Job) -> Result<(), QueueError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(QueueError::Closed);
        }
        self.ready
            .lock()
            .expect("queue lock poisoned")
            .push_back(QueuedJob { job, attempt: 0 });
        self.notify.notify_one();
        Ok(())
    }

    async fn dequeue(&self) -> Result<Delivery, QueueError> {
        loop {
            // Register for notification before checking the queue, so an
            // enqueue between the check and the await is not lost.
            let notified = self.notify.notified();

            if let Some(mut queued) = self.pop_ready() {
                queued.attempt += 1;
                let receipt = Uuid::new_v4().to_string();
                let delivery = Delivery {
                    job: queued.job.clone(),
                    receipt: receipt.clone(),
                    attempt: queued.attempt,
                };
                self.in_flight.insert(receipt, queued);
                return Ok(delivery);
            }

            if self.closed.load(Ordering::SeqCst) {
                return Err(QueueError::Closed);
            }

            notified.await;
        }
    }

    async fn ack(&self, delivery: &Delivery) -> Result<(), QueueError> {
        self.in_flight
            .remove(&delivery.receipt)
            .map(|_| ())
            .ok_or_else(|| QueueError::UnknownReceipt(delivery.receipt.clone()))
    }

    async fn nack(&self, delivery: &Delivery) -> Result<(), QueueError> {
        let (_, queued) = self
            .in_flight
            .remove(&delivery.receipt)
            .ok_or_else(|| QueueError::UnknownReceipt(delivery.receipt.clone()))?;
        self.ready
            .lock()
            .expect("queue lock poisoned")
            .push_back(queued);
        self.notify.notify_one();
        Ok(())
    }
}
