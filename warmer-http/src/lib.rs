//! HTTP transport for the cache warmer
//!
//! This crate provides the [`HttpClient`] seam the warming engine dispatches
//! through, and [`HttpManager`], its `reqwest`-backed implementation sharing a
//! single connection pool across all workers.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use client::{HttpClient, HttpManager};
pub use config::HttpConfig;
pub use errors::HttpError;
pub use types::{cookie_header, HttpResponse};
