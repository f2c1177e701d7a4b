use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use papercast_core::{SourceKind, SourceLocation};

use crate::error::CapabilityError;

/// Retrieves raw document bytes from a URI or path.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch the bytes at `location`. A missing resource is
    /// [`CapabilityError::NotFound`]; transport failures are
    /// [`CapabilityError::Connection`].
    async fn fetch(&self, location: &SourceLocation) -> Result<Bytes, CapabilityError>;
}

/// Fetcher that handles both remote URLs (via HTTP) and local paths
/// (via the filesystem), matching how uploads arrive: either already
/// pushed to object storage or sitting in a temporary upload directory.
#[derive(Debug, Default)]
pub struct HttpSourceFetcher {
    client: reqwest::Client,
}

impl HttpSourceFetcher {
    /// Create a fetcher with a default HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher with a caller-configured HTTP client (timeouts,
    /// proxies, TLS settings).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_url(&self, url: &str) -> Result<Bytes, CapabilityError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CapabilityError::Connection(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CapabilityError::NotFound(url.to_owned()));
        }
        if !response.status().is_success() {
            return Err(CapabilityError::ExecutionFailed(format!(
                "fetch of {url} returned HTTP {}",
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| CapabilityError::Connection(e.to_string()))
    }

    async fn fetch_path(&self, path: &str) -> Result<Bytes, CapabilityError> {
        match tokio::fs::read(path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CapabilityError::NotFound(path.to_owned()))
            }
            Err(e) => Err(CapabilityError::ExecutionFailed(format!(
                "read of {path} failed: {e}"
            ))),
        }
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<Bytes, CapabilityError> {
        debug!(location = %location, "fetching source bytes");
        match location.kind() {
            SourceKind::RemoteUrl => self.fetch_url(location.as_str()).await,
            SourceKind::LocalPath => self.fetch_path(location.as_str()).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_path_not_found() {
        let fetcher = HttpSourceFetcher::new();
        let missing = SourceLocation::from("/nonexistent/papercast-test.pdf");
        let err = fetcher.fetch(&missing).await.unwrap_err();
        assert!(matches!(err, CapabilityError::NotFound(_)));
    }

    #[tokio::test]
    async fn local_path_reads_bytes() {
        let dir = std::env::temp_dir().join("papercast-fetch-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.bin");
        std::fs::write(&path, b"pdf bytes here").unwrap();

        let fetcher = HttpSourceFetcher::new();
        let location = SourceLocation::from(path.to_string_lossy().to_string());
        let bytes = fetcher.fetch(&location).await.unwrap();
        assert_eq!(&bytes[..], b"pdf bytes here");

        let _ = std::fs::remove_file(&path);
    }
}
