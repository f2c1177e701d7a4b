use async_trait::async_trait;
use bytes::Bytes;

use crate::error::CapabilityError;

/// Text-to-speech synthesis.
///
/// Implementations may return an empty payload on a degenerate input; the
/// podcast pipeline treats an empty result as a failure and never uploads
/// it.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into a binary audio payload (MP3).
    async fn synthesize(&self, text: &str) -> Result<Bytes, CapabilityError>;
}
