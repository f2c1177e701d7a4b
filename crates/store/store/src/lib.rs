pub mod error;
pub mod projection;
pub mod store;

pub use error::StoreError;
pub use projection::{IngestionStatusView, PodcastStatusView, StatusProjector};
pub use store::DocumentStore;
