use std::sync::Arc;

use tracing::{error, info, warn};

use papercast_capability::{CapabilityError, IndexBuilder, PdfParser, SourceFetcher};
use papercast_core::{Document, DocumentId, IndexName, IngestionStatus, SourceLocation};
use papercast_store::DocumentStore;

use crate::config::PipelineConfig;
use crate::error::{bounded, PipelineError, Stage};
use crate::outcome::JobOutcome;

/// Turns an uploaded PDF into a queryable document: fetch, parse, index,
/// then open the document's conversation.
///
/// Deliveries are at-least-once, so the entry guard makes redelivery a
/// no-op: a COMPLETED document only has its conversation re-ensured, a
/// FAILED one is never retried automatically.
pub struct IngestionPipeline {
    store: Arc<dyn DocumentStore>,
    fetcher: Arc<dyn SourceFetcher>,
    parser: Arc<dyn PdfParser>,
    indexer: Arc<dyn IndexBuilder>,
    config: PipelineConfig,
}

impl IngestionPipeline {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        fetcher: Arc<dyn SourceFetcher>,
        parser: Arc<dyn PdfParser>,
        indexer: Arc<dyn IndexBuilder>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            parser,
            indexer,
            config,
        }
    }

    /// Process one ingestion job. Never returns an error: failures become
    /// a FAILED status plus a [`JobOutcome::Failed`].
    pub async fn process(
        &self,
        document_id: &DocumentId,
        source: &SourceLocation,
        index_name: &IndexName,
    ) -> JobOutcome {
        let document = match self.store.document(document_id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                warn!(document_id = %document_id, "ingestion job references unknown document");
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

        match document.ingestion_status {
            IngestionStatus::Completed => {
                // Redelivery after the status write landed but before the
                // conversation did; re-ensure it and move on.
                if let Err(err) = self.ensure_conversation(&document).await {
                    error!(document_id = %document_id, error = %err, "conversation create failed on redelivery");
                    return JobOutcome::Failed {
                        stage: Stage::StatusWrite,
                        message: err.to_string(),
                    };
                }
                return JobOutcome::skipped("document already ingested");
            }
            IngestionStatus::Failed => {
                return JobOutcome::skipped("document previously failed ingestion");
            }
            IngestionStatus::Pending | IngestionStatus::Processing => {}
        }

        match self.run(&document, source, index_name).await {
            Ok(()) => {
                info!(document_id = %document_id, index_name = %index_name, "document ingested");
                match self.ensure_conversation(&document).await {
                    Ok(()) => JobOutcome::Completed,
                    Err(err) => {
                        // The document is COMPLETED; only the conversation
                        // is missing. Surface it as a job failure so the
                        // redelivery path above can repair it.
                        error!(document_id = %document_id, error = %err, "conversation create failed");
                        JobOutcome::Failed {
                            stage: Stage::StatusWrite,
                            message: err.to_string(),
                        }
                    }
                }
            }
            Err(err) => {
                error!(
                    document_id = %document_id,
                    stage = %err.stage(),
                    retryable = err.is_retryable(),
                    error = %err,
                    "ingestion failed"
                );
                if let Err(write_err) = self
                    .store
                    .update_ingestion_status(document_id, IngestionStatus::Failed)
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
        document: &Document,
        source: &SourceLocation,
        index_name: &IndexName,
    ) -> Result<(), PipelineError> {
        self.store
            .update_ingestion_status(&document.id, IngestionStatus::Processing)
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
                CapabilityError::Content("document produced no pages".into()),
            ));
        }

        bounded(
            self.config.step_timeout,
            Stage::Index,
            self.indexer.build(&pages, index_name),
        )
        .await?;

        self.store
            .update_ingestion_status(&document.id, IngestionStatus::Completed)
            .await?;
        Ok(())
    }

    async fn ensure_conversation(&self, document: &Document) -> Result<(), PipelineError> {
        self.store
            .create_conversation_if_absent(&document.user_id, &document.id, &document.file_name)
            .await?;
        Ok(())
    }
}
