// Module declarations for search engine abstractions
pub mod availability;
pub mod client;
pub mod mock;
pub mod traits;

// Re-exports for convenience
pub use availability::{Availability, IndexAvailabilityChecker};
pub use client::RediSearchClient;
pub use mock::MockSearchClient;
pub use traits::{IndexInfo, SearchClient};
