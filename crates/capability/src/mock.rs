//! Configurable capability fakes shared by pipeline and integration tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use papercast_core::{IndexName, SourceLocation};

use crate::error::CapabilityError;
use crate::fetch::SourceFetcher;
use crate::index::IndexBuilder;
use crate::parse::{PdfPage, PdfParser};
use crate::script::ScriptModel;
use crate::speech::SpeechSynthesizer;
use crate::storage::ObjectStore;

/// A fetcher that returns fixed bytes or a fixed failure.
#[derive(Debug)]
pub struct MockFetcher {
    result: Result<Bytes, String>,
}

impl MockFetcher {
    /// Fetcher that always returns `data`.
    #[must_use]
    pub fn returning(data: impl Into<Bytes>) -> Self {
        Self {
            result: Ok(data.into()),
        }
    }

    /// Fetcher that always fails with a connection error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
        }
    }
}

#[async_trait]
impl SourceFetcher for MockFetcher {
    async fn fetch(&self, _location: &SourceLocation) -> Result<Bytes, CapabilityError> {
        match &self.result {
            Ok(data) => Ok(data.clone()),
            Err(msg) => Err(CapabilityError::Connection(msg.clone())),
        }
    }
}

/// A parser that returns fixed pages, an empty page list, or a content
/// error (the corrupt-PDF case).
#[derive(Debug)]
pub struct MockParser {
    result: Result<Vec<PdfPage>, String>,
}

impl MockParser {
    /// Parser that yields one page per string in `pages`.
    #[must_use]
    pub fn with_pages(pages: &[&str]) -> Self {
        Self {
            result: Ok(pages
                .iter()
                .enumerate()
                .map(|(i, text)| PdfPage::new(i, *text))
                .collect()),
        }
    }

    /// Parser that yields zero pages (a PDF with no extractable text).
    #[must_use]
    pub fn empty() -> Self {
        Self { result: Ok(Vec::new()) }
    }

    /// Parser that rejects the payload as corrupt.
    #[must_use]
    pub fn corrupt() -> Self {
        Self {
            result: Err("not a parseable PDF".into()),
        }
    }
}

#[async_trait]
impl PdfParser for MockParser {
    async fn parse(&self, _bytes: Bytes) -> Result<Vec<PdfPage>, CapabilityError> {
        match &self.result {
            Ok(pages) => Ok(pages.clone()),
            Err(msg) => Err(CapabilityError::Content(msg.clone())),
        }
    }
}

/// An index builder that records every build call for later verification.
#[derive(Debug, Default)]
pub struct RecordingIndexBuilder {
    builds: Mutex<Vec<(IndexName, usize)>>,
    fail: bool,
}

impl RecordingIndexBuilder {
    /// Builder that succeeds and records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that fails every call.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            builds: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Captured `(index_name, page_count)` pairs, in call order.
    #[must_use]
    pub fn builds(&self) -> Vec<(IndexName, usize)> {
        self.builds.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl IndexBuilder for RecordingIndexBuilder {
    async fn build(
        &self,
        pages: &[PdfPage],
        index_name: &IndexName,
    ) -> Result<(), CapabilityError> {
        if self.fail {
            return Err(CapabilityError::ExecutionFailed("index backend down".into()));
        }
        self.builds
            .lock()
            .expect("mock lock poisoned")
            .push((index_name.clone(), pages.len()));
        Ok(())
    }
}

/// A script model that records the exact inputs passed to each call.
///
/// The recorded summarize input is what truncation tests assert against.
#[derive(Debug, Default)]
pub struct RecordingScriptModel {
    summarize_inputs: Mutex<Vec<String>>,
    monologue_inputs: Mutex<Vec<String>>,
    fail_summarize: bool,
}

impl RecordingScriptModel {
    /// Model that succeeds with canned outputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Model whose summarize call fails.
    #[must_use]
    pub fn failing_summarize() -> Self {
        Self {
            fail_summarize: true,
            ..Self::default()
        }
    }

    /// Inputs passed to `summarize`, in call order.
    #[must_use]
    pub fn summarize_inputs(&self) -> Vec<String> {
        self.summarize_inputs
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }

    /// Inputs passed to `monologue`, in call order.
    #[must_use]
    pub fn monologue_inputs(&self) -> Vec<String> {
        self.monologue_inputs
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }
}

#[async_trait]
impl ScriptModel for RecordingScriptModel {
    async fn summarize(&self, text: &str) -> Result<String, CapabilityError> {
        if self.fail_summarize {
            return Err(CapabilityError::ExecutionFailed("model unavailable".into()));
        }
        self.summarize_inputs
            .lock()
            .expect("mock lock poisoned")
            .push(text.to_owned());
        Ok(format!("summary of {} chars", text.chars().count()))
    }

    async fn monologue(&self, summary: &str) -> Result<String, CapabilityError> {
        self.monologue_inputs
            .lock()
            .expect("mock lock poisoned")
            .push(summary.to_owned());
        Ok(format!("welcome to the show. {summary}"))
    }
}

/// A synthesizer that returns fixed audio bytes (possibly empty) or fails.
#[derive(Debug)]
pub struct MockSynthesizer {
    result: Result<Bytes, String>,
}

impl MockSynthesizer {
    /// Synthesizer returning `audio`.
    #[must_use]
    pub fn returning(audio: impl Into<Bytes>) -> Self {
        Self {
            result: Ok(audio.into()),
        }
    }

    /// Synthesizer returning an empty payload.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            result: Ok(Bytes::new()),
        }
    }

    /// Synthesizer that fails outright.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Bytes, CapabilityError> {
        match &self.result {
            Ok(audio) => Ok(audio.clone()),
            Err(msg) => Err(CapabilityError::ExecutionFailed(msg.clone())),
        }
    }
}

/// An in-memory object store keyed by object key, overwriting on re-put.
#[derive(Debug)]
pub struct MemoryObjectStore {
    base_url: String,
    objects: DashMap<String, Bytes>,
    put_count: AtomicUsize,
}

impl MemoryObjectStore {
    /// Create a store that serves public URLs under `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: DashMap::new(),
            put_count: AtomicUsize::new(0),
        }
    }

    /// Number of put calls observed.
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }

    /// The stored bytes for `key`, if any.
    #[must_use]
    pub fn object(&self, key: &str) -> Option<Bytes> {
        self.objects.get(key).map(|entry| entry.clone())
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new("https://storage.test")
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        _content_type: &str,
    ) -> Result<String, CapabilityError> {
        self.put_count.fetch_add(1, Ordering::SeqCst);
        self.objects.insert(key.to_owned(), data);
        Ok(format!("{}/{key}", self.base_url))
    }
}
