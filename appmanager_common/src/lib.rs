//! Common types and utilities for the Flink AppManager client and provider.

pub mod config;
pub mod error;
pub mod resource;

// Re-export the shared ecosystem so every crate in the workspace builds against the same versions.
pub use ::anyhow;
pub use ::serde;
pub use ::serde_json;
pub use ::time;
pub use ::tokio;
pub use ::tracing;
pub use ::tracing_subscriber;
