use async_trait::async_trait;

use papercast_core::IndexName;

use crate::error::CapabilityError;
use crate::parse::PdfPage;

/// Builds and persists a searchable index from parsed text under an opaque
/// handle.
///
/// Implementations must have upsert semantics: building again under the
/// same handle overwrites deterministically rather than failing on
/// "already exists", so a redelivered ingestion job converges to the same
/// result.
#[async_trait]
pub trait IndexBuilder: Send + Sync {
    /// Embed and index `pages` under `index_name`.
    async fn build(&self, pages: &[PdfPage], index_name: &IndexName)
        -> Result<(), CapabilityError>;
}
