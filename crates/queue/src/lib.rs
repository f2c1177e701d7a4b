pub mod error;
pub mod memory;
pub mod queue;

pub use error::QueueError;
pub use memory::MemoryJobQueue;
pub use queue::{Delivery, JobQueue};
