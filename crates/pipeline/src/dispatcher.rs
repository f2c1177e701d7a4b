use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info, warn};

use papercast_core::{Job, JobPayload};
use papercast_queue::{JobQueue, QueueError};

use crate::config::DispatcherConfig;
use crate::ingestion::IngestionPipeline;
use crate::outcome::JobOutcome;
use crate::podcast::PodcastPipeline;

/// Pulls deliveries off the queue and routes each to its pipeline on a
/// spawned task, at most `max_concurrent` in flight.
///
/// Every delivery is acked exactly once, whatever the pipeline outcome:
/// business failures live in the document's status, not in queue
/// redelivery. One job's failure never stops the loop or other slots.
pub struct WorkerDispatcher {
    queue: Arc<dyn JobQueue>,
    ingestion: Arc<IngestionPipeline>,
    podcast: Arc<PodcastPipeline>,
    semaphore: Arc<Semaphore>,
}

impl WorkerDispatcher {
    pub fn new(
        queue: Arc<dyn JobQueue>,
        ingestion: Arc<IngestionPipeline>,
        podcast: Arc<PodcastPipeline>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            queue,
            ingestion,
            podcast,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        }
    }

    /// Run the dispatch loop until the queue closes or a message arrives
    /// on `shutdown`. In-flight jobs finish on their own tasks.
    pub async fn run(self: Arc<Self>, mut shutdown: mpsc::Receiver<()>) {
        info!("worker dispatcher started");
        loop {
            let permit = tokio::select! {
                _ = shutdown.recv() => {
                    info!("worker dispatcher shutting down");
                    break;
                }
                permit = Arc::clone(&self.semaphore).acquire_owned() => {
                    permit.expect("semaphore should never be closed")
                }
            };

            let delivery = tokio::select! {
                _ = shutdown.recv() => {
                    info!("worker dispatcher shutting down");
                    break;
                }
                delivery = self.queue.dequeue() => match delivery {
                    Ok(delivery) => delivery,
                    Err(QueueError::Closed) => {
                        info!("job queue closed, worker dispatcher stopping");
                        break;
                    }
                    Err(err) => {
                        error!(error = %err, "dequeue failed, worker dispatcher stopping");
                        break;
                    }
                },
            };

            let dispatcher = Arc::clone(&self);
            tokio::spawn(async move {
                let job_id = delivery.job.id.clone();
                let outcome = dispatcher.handle(&delivery.job).await;
                match &outcome {
                    JobOutcome::Completed => {
                        debug!(job_id = %job_id, "job completed");
                    }
                    JobOutcome::Skipped { reason } => {
                        debug!(job_id = %job_id, reason = %reason, "job skipped");
                    }
                    JobOutcome::Failed { stage, message } => {
                        warn!(job_id = %job_id, stage = %stage, message = %message, "job failed");
                    }
                }
                if let Err(err) = dispatcher.queue.ack(&delivery).await {
                    error!(job_id = %job_id, error = %err, "ack failed");
                }
                drop(permit);
            });
        }
    }

    async fn handle(&self, job: &Job) -> JobOutcome {
        match &job.payload {
            JobPayload::FileProcessing {
                document_id,
                source_location,
                index_name,
            } => {
                self.ingestion
                    .process(document_id, source_location, index_name)
                    .await
            }
            JobPayload::PodcastGeneration {
                document_id,
                source_location,
            } => self.podcast.process(document_id, source_location).await,
            JobPayload::Unknown => {
                warn!(job_id = %job.id, "unknown job payload, ignoring");
                JobOutcome::skipped("unknown job payload")
            }
        }
    }
}
