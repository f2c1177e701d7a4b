use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use papercast_capability::CapabilityError;
use papercast_store::StoreError;

/// The checkpoint a pipeline run was at when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the document record from the store.
    Load,
    /// Writing a status checkpoint to the store.
    StatusWrite,
    Fetch,
    Parse,
    Index,
    Summarize,
    Script,
    Synthesize,
    Upload,
}

impl Stage {
    /// Short name for log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::StatusWrite => "status_write",
            Self::Fetch => "fetch",
            Self::Parse => "parse",
            Self::Index => "index",
            Self::Summarize => "summarize",
            Self::Script => "script",
            Self::Synthesize => "synthesize",
            Self::Upload => "upload",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal error carried between a pipeline's steps. Never escapes the
/// pipeline boundary: `process` converts it into a status mutation, a log
/// entry, and a [`JobOutcome::Failed`](crate::JobOutcome::Failed).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage} step failed: {source}")]
    Capability {
        stage: Stage,
        #[source]
        source: CapabilityError,
    },

    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

impl PipelineError {
    /// Wrap a capability error with the stage it occurred in.
    #[must_use]
    pub fn capability(stage: Stage, source: CapabilityError) -> Self {
        Self::Capability { stage, source }
    }

    /// The stage this error is attributed to.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Capability { stage, .. } => *stage,
            Self::Store(_) => Stage::StatusWrite,
        }
    }

    /// Whether the underlying failure was transient (affects only the log
    /// line; the pipeline outcome is terminal either way).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Capability { source, .. } => source.is_retryable(),
            Self::Store(_) => false,
        }
    }
}

/// Run one external-capability call with a bounded timeout. Timeout is a
/// step failure like any other.
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    stage: Stage,
    fut: F,
) -> Result<T, PipelineError>
where
    F: Future<Output = Result<T, CapabilityError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(PipelineError::capability(stage, err)),
        Err(_elapsed) => Err(PipelineError::capability(
            stage,
            CapabilityError::Timeout(limit),
        )),
    }
}
