//! Logging setup for the cache warmer
//!
//! Console output goes to stderr in the configured format. When an error log
//! path is configured, warnings and errors are also appended to that file
//! through a non-blocking writer; keep the returned [`LoggingGuard`] alive
//! until exit so buffered lines are flushed.

pub mod init;

pub use init::{build_filter, init_logging_from_config, init_simple_tracing, LoggingGuard};
