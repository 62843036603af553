//! Concurrent cache warming engine
//!
//! The engine issues one GET per (URL, profile) pair through a fixed-width
//! worker pool, classifies every response as a cache HIT, MISS or transport
//! ERROR, and folds the results into per-profile and session-wide summaries.
//!
//! Components, leaf-first:
//!
//! - [`CacheClassifier`]: pure mapping from an exchange to an [`Outcome`].
//! - [`WorkerPool`]: bounded-concurrency executor with a per-request deadline.
//! - [`ProfileRunner`]: one pass over all URLs for one profile, results
//!   restored to input order.
//! - [`WarmingSession`]: runs every profile in order and aggregates.
//!
//! Observers plug in through [`ProgressSink`]; the HTTP transport through
//! [`warmer_http::HttpClient`].

pub mod classifier;
pub mod error;
pub mod model;
pub mod pool;
pub mod progress;
pub mod runner;
pub mod session;

// Re-export main types
pub use classifier::CacheClassifier;
pub use error::{EngineError, EngineResult};
pub use model::{AggregateSummary, Outcome, Profile, ProfileSummary, RequestResult, UrlTarget};
pub use pool::{CompletedItem, WorkItem, WorkerPool};
pub use progress::{NoopProgress, ProgressSink};
pub use runner::ProfileRunner;
pub use session::{effective_profiles, WarmingSession};
