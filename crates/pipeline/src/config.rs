use std::time::Duration;

/// Configuration shared by both pipelines.
///
/// # Examples
///
/// ```
/// use papercast_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.summary_input_cap, 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum wall-clock time allowed for a single external-capability
    /// call. A hung fetch, model call, or upload counts as a step failure
    /// instead of pinning a worker slot forever.
    pub step_timeout: Duration,

    /// Maximum number of characters of extracted text handed to the
    /// summarization capability. Longer documents are truncated to exactly
    /// this prefix to bound cost and latency.
    pub summary_input_cap: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            step_timeout: Duration::from_secs(30),
            summary_input_cap: 10_000,
        }
    }
}

/// Configuration for the [`WorkerDispatcher`](crate::WorkerDispatcher).
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Maximum number of jobs whose pipeline bodies may execute
    /// concurrently. Enforced via a [`tokio::sync::Semaphore`]; beyond
    /// this, dequeuing pauses.
    pub max_concurrent: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { max_concurrent: 5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.step_timeout, Duration::from_secs(30));
        assert_eq!(cfg.summary_input_cap, 10_000);
        assert_eq!(DispatcherConfig::default().max_concurrent, 5);
    }
}
