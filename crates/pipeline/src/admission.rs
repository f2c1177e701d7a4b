use std::sync::Arc;

use tracing::{error, info};

use papercast_core::{DocumentId, Job, PapercastError, PodcastStatus};
use papercast_queue::JobQueue;
use papercast_store::{DocumentStore, StoreError};

/// Result of a podcast request at the admission boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodcastAdmission {
    /// A generation job was enqueued.
    Accepted { job_id: papercast_core::JobId },
    /// No job was enqueued; the caller gets the current state instead.
    Rejected {
        status: PodcastStatus,
        podcast_url: Option<String>,
    },
}

/// Admit or reject a podcast-generation request for a document.
///
/// Admission flips the status to GENERATING *before* enqueuing, so once a
/// request has been admitted every later request is rejected until the run
/// resolves. The read-check and the status write are two store calls, not
/// a compare-and-swap, so two requests interleaving between them can both
/// be admitted; that window is tolerated because the duplicate job is
/// harmless: the second GENERATING write is a legal self-transition and
/// the pipeline entry guard skips documents that already published.
pub async fn request_podcast(
    store: &Arc<dyn DocumentStore>,
    queue: &Arc<dyn JobQueue>,
    document_id: &DocumentId,
) -> Result<PodcastAdmission, PapercastError> {
    let document = store
        .document(document_id)
        .await
        .map_err(|err| PapercastError::Store(err.to_string()))?
        .ok_or_else(|| {
            PapercastError::Store(StoreError::NotFound(document_id.to_string()).to_string())
        })?;

    if !document.podcast_status.admits_new_request() {
        return Ok(PodcastAdmission::Rejected {
            status: document.podcast_status,
            podcast_url: document.podcast_url,
        });
    }

    store
        .update_podcast_status(document_id, PodcastStatus::Generating, None)
        .await
        .map_err(|err| PapercastError::Store(err.to_string()))?;

    let job = Job::podcast_generation(document_id.clone(), document.source_location.clone());
    let job_id = job.id.clone();
    if let Err(err) = queue.enqueue(job).await {
        // No job exists to move the document out of GENERATING, so leaving
        // it there would block every future request. Mark it FAILED so the
        // request can be retried.
        error!(document_id = %document_id, error = %err, "enqueue failed, marking podcast FAILED");
        if let Err(write_err) = store
            .update_podcast_status(document_id, PodcastStatus::Failed, None)
            .await
        {
            error!(document_id = %document_id, error = %write_err, "failed-status write failed");
        }
        return Err(PapercastError::Queue(err.to_string()));
    }

    info!(document_id = %document_id, job_id = %job_id, "podcast generation requested");
    Ok(PodcastAdmission::Accepted { job_id })
}
