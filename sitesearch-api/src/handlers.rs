// Module declarations for HTTP handlers
pub mod health;

// Re-exports
pub use health::health_handler;
