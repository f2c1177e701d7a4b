//! Job pipelines for document ingestion and podcast generation, plus the
//! dispatcher that drives them off a [`papercast_queue::JobQueue`].

pub mod admission;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod ingestion;
pub mod outcome;
pub mod podcast;

pub use admission::{request_podcast, PodcastAdmission};
pub use config::{DispatcherConfig, PipelineConfig};
pub use dispatcher::WorkerDispatcher;
pub use error::{PipelineError, Stage};
pub use ingestion::IngestionPipeline;
pub use outcome::JobOutcome;
pub use podcast::PodcastPipeline;
