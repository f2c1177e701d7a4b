use async_trait::async_trait;
use bytes::Bytes;

use crate::error::CapabilityError;

/// Durable object storage with public-read retrieval.
///
/// `put` must overwrite deterministically under the same key so that a
/// redelivered podcast job converges instead of erroring on "already
/// exists". Papercast does not ship a durable implementation; users bring
/// their own (S3, R2, GCS).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key` and return its public URL.
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, CapabilityError>;
}
