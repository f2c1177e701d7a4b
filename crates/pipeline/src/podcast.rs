use std::sync::Arc;

use tracing::{error, info, warn};

use papercast_capability::{
    CapabilityError, ObjectStore, PdfParser, ScriptModel, SourceFetcher, SpeechSynthesizer,
};
use papercast_core::{DocumentId, PodcastStatus, SourceLocation};
use papercast_store::DocumentStore;

use crate::config::PipelineConfig;
use crate::error::{bounded, PipelineError, Stage};
use crate::outcome::JobOutcome;

/// Turns a document's source PDF into a published podcast episode:
/// fetch, parse, summarize, script, synthesize, upload.
///
/// The pipeline re-reads the source itself rather than the ingestion
/// index, so a podcast can be generated for any document whose source is
/// still reachable. Admission control lives at the request boundary
/// ([`request_podcast`](crate::request_podcast)); the COMPLETED check here
/// is the redelivery guard.
pub struct PodcastPipeline {
    store: Arc<dyn DocumentStore>,
    fetcher: Arc<dyn SourceFetcher>,
    parser: Arc<dyn PdfParser>,
    script: Arc<dyn ScriptModel>,
    speech: Arc<dyn SpeechSynthesizer>,
    objects: Arc<dyn ObjectStore>,
    config: PipelineConfig,
}

impl PodcastPipeline {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        fetcher: Arc<dyn SourceFetcher>,
        parser: Arc<dyn PdfParser>,
        script: Arc<dyn ScriptModel>,
        speech: Arc<dyn SpeechSynthesizer>,
        objects: Arc<dyn ObjectStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            parser,
            script,
            speech,
            objects,
            config,
        }
    }

    /// Process one podcast-generation job. Never returns an error:
    /// failures become a FAILED podcast status plus a
    /// [`JobOutcome::Failed`].
    pub async fn process(&self, document_id: &DocumentId, source: &SourceLocation) -> JobOutcome {
        let outcome = self.process_inner(document_id, source).await;
        self.cleanup_local_source(source).await;
        outcome
    }

    async fn process_inner(
        &self,
        document_id: &DocumentId,
        source: &SourceLocation,
    ) -> JobOutcome {
        let document = match self.store.document(document_id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                warn!(document_id = %document_id, "podcast job references unknown document");
                return JobOutcome::skipped("document not found");
            }
            Err(err) => {
                error!(document_id = %document_id, error = %err, "document lookup failed");
                return JobOutcome::Failed {
                    stage: Stage::Load,
                    message: err.to_string(),
                };
            }
        };

        if document.podcast_status == PodcastStatus::Completed {
            return JobOutcome::skipped(match document.podcast_url {
                Some(url) => format!("podcast already published at {url}"),
                None => "podcast already published".to_owned(),
            });
        }

        match self.run(document_id, source).await {
            Ok(url) => {
                info!(document_id = %document_id, url = %url, "podcast published");
                JobOutcome::Completed
            }
            Err(err) => {
                error!(
                    document_id = %document_id,
                    stage = %err.stage(),
                    retryable = err.is_retryable(),
                    error = %err,
                    "podcast generation failed"
                );
                if let Err(write_err) = self
                    .store
                    .update_podcast_status(document_id, PodcastStatus::Failed, None)
                    .await
                {
                    error!(document_id = %document_id, error = %write_err, "failed-status write failed");
                }
                JobOutcome::Failed {
                    stage: err.stage(),
                    message: err.to_string(),
                }
            }
        }
    }

    async fn run(
        &self,
        document_id: &DocumentId,
        source: &SourceLocation,
    ) -> Result<String, PipelineError> {
        self.store
            .update_podcast_status(document_id, PodcastStatus::Generating, None)
            .await?;

        let bytes = bounded(
            self.config.step_timeout,
            Stage::Fetch,
            self.fetcher.fetch(source),
        )
        .await?;

        let pages = bounded(
            self.config.step_timeout,
            Stage::Parse,
            self.parser.parse(bytes),
        )
        .await?;
        if pages.is_empty() {
            return Err(PipelineError::capability(
                Stage::Parse,
                CapabilityError::Content("document produced no text".into()),
            ));
        }

        let full_text = pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let source_text = truncate_to_chars(&full_text, self.config.summary_input_cap);

        let summary = bounded(
            self.config.step_timeout,
            Stage::Summarize,
            self.script.summarize(source_text),
        )
        .await?;

        let monologue = bounded(
            self.config.step_timeout,
            Stage::Script,
            self.script.monologue(&summary),
        )
        .await?;

        let audio = bounded(
            self.config.step_timeout,
            Stage::Synthesize,
            self.speech.synthesize(&monologue),
        )
        .await?;
        if audio.is_empty() {
            return Err(PipelineError::capability(
                Stage::Synthesize,
                CapabilityError::Content("synthesizer returned no audio".into()),
            ));
        }

        let key = format!("podcasts/{document_id}.mp3");
        let url = bounded(
            self.config.step_timeout,
            Stage::Upload,
            self.objects.put(&key, audio, "audio/mpeg"),
        )
        .await?;

        self.store
            .update_podcast_status(document_id, PodcastStatus::Completed, Some(url.clone()))
            .await?;
        Ok(url)
    }

    /// Uploaded sources land in a scratch path that is single-use; remove
    /// it once the job is done, whatever the outcome. Removal failure is
    /// log-only.
    async fn cleanup_local_source(&self, source: &SourceLocation) {
        if !source.is_local() {
            return;
        }
        if let Err(err) = tokio::fs::remove_file(source.as_str()).await {
            warn!(path = source.as_str(), error = %err, "scratch file removal failed");
        }
    }
}

/// Truncate to at most `cap` characters, on a character boundary.
fn truncate_to_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_exact_and_boundary_safe() {
        let text = "a".repeat(12);
        assert_eq!(truncate_to_chars(&text, 10).len(), 10);
        assert_eq!(truncate_to_chars("short", 10), "short");

        // Multi-byte characters count as one each.
        let text = "é".repeat(5);
        assert_eq!(truncate_to_chars(&text, 3).chars().count(), 3);
    }
}
