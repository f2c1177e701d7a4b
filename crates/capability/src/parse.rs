use async_trait::async_trait;
use bytes::Bytes;

use crate::error::CapabilityError;

/// One page-level unit of extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// Zero-based page index, preserving document order.
    pub page_index: usize,
    /// Extracted text of the page.
    pub text: String,
}

impl PdfPage {
    /// Create a page unit.
    #[must_use]
    pub fn new(page_index: usize, text: impl Into<String>) -> Self {
        Self {
            page_index,
            text: text.into(),
        }
    }
}

/// Parses PDF bytes into an ordered sequence of page-level text units.
///
/// A structurally invalid payload is an error. An empty page list is *not*
/// an error at this layer; the ingestion pipeline decides that zero
/// extracted pages means failure.
#[async_trait]
pub trait PdfParser: Send + Sync {
    /// Parse `bytes` into ordered pages.
    async fn parse(&self, bytes: Bytes) -> Result<Vec<PdfPage>, CapabilityError>;
}

/// Split extracted text into page units on form-feed boundaries.
///
/// Extractors that emit page breaks use `\x0c`; when none is present the
/// whole text becomes a single unit. Whitespace-only fragments are dropped.
#[must_use]
pub fn pages_from_text(text: &str) -> Vec<PdfPage> {
    text.split('\u{c}')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .map(|(i, fragment)| PdfPage::new(i, fragment))
        .collect()
}

/// [`PdfParser`] backed by the `pdf-extract` crate.
///
/// Extraction is CPU-bound, so it runs on the blocking pool.
#[cfg(feature = "pdf")]
#[derive(Debug, Default)]
pub struct PdfExtractParser;

#[cfg(feature = "pdf")]
impl PdfExtractParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "pdf")]
#[async_trait]
impl PdfParser for PdfExtractParser {
    async fn parse(&self, bytes: Bytes) -> Result<Vec<PdfPage>, CapabilityError> {
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
        })
        .await
        .map_err(|e| CapabilityError::ExecutionFailed(format!("parser task panicked: {e}")))?
        .map_err(|e| CapabilityError::Content(format!("not a parseable PDF: {e}")))?;

        Ok(pages_from_text(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_split_on_form_feed() {
        let pages = pages_from_text("page one\u{c}page two\u{c}page three");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], PdfPage::new(0, "page one"));
        assert_eq!(pages[2], PdfPage::new(2, "page three"));
    }

    #[test]
    fn single_unit_without_form_feed() {
        let pages = pages_from_text("all of it on one page");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_index, 0);
    }

    #[test]
    fn whitespace_only_text_yields_no_pages() {
        assert!(pages_from_text("").is_empty());
        assert!(pages_from_text("  \n\t \u{c}   ").is_empty());
    }

    #[test]
    fn blank_fragments_are_dropped_and_reindexed() {
        let pages = pages_from_text("first\u{c}\u{c}second");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1], PdfPage::new(1, "second"));
    }

    #[cfg(feature = "pdf")]
    #[tokio::test]
    async fn corrupt_bytes_are_a_content_error() {
        let parser = PdfExtractParser::new();
        let err = parser
            .parse(Bytes::from_static(b"this is not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, CapabilityError::Content(_)));
    }
}
