use crate::error::Stage;

/// What a single job delivery amounted to. Business failures are reflected
/// in the document's status, so every outcome results in an ack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The pipeline ran to the end and the document reached its terminal
    /// success state.
    Completed,
    /// Nothing needed doing (redelivery of already-finished work, unknown
    /// payload variant, missing document).
    Skipped { reason: String },
    /// The pipeline failed at `stage`; the document was marked FAILED where
    /// the store allowed it.
    Failed { stage: Stage, message: String },
}

impl JobOutcome {
    #[must_use]
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }
}
