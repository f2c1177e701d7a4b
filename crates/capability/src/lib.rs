pub mod error;
pub mod fetch;
pub mod index;
pub mod mock;
pub mod parse;
pub mod script;
pub mod speech;
pub mod storage;

pub use error::CapabilityError;
pub use fetch::{HttpSourceFetcher, SourceFetcher};
pub use index::IndexBuilder;
pub use parse::{PdfPage, PdfParser, pages_from_text};
#[cfg(feature = "pdf")]
pub use parse::PdfExtractParser;
pub use script::ScriptModel;
pub use speech::SpeechSynthesizer;
pub use storage::ObjectStore;
