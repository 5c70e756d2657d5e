//! Sampling service clients

pub mod tinker;

// Re-export for convenience
pub use tinker::{SampleFuture, SamplingClient, ServiceClient};
