//! Progress notifications pushed to observers
//!
//! The engine only ever calls into a sink; sinks never feed anything back.
//! Every method has a no-op default so observers implement just what they
//! render.

use crate::model::{AggregateSummary, Profile, ProfileSummary, RequestResult};

pub trait ProgressSink: Send + Sync {
    /// A profile pass over `total` URLs is about to start
    fn profile_started(&self, _profile: &Profile, _total: usize) {}

    /// One more URL finished; emitted in completion order
    fn on_progress(&self, _completed: usize, _total: usize, _profile_name: &str) {}

    /// A single result as it arrives, before reordering
    fn on_result(&self, _result: &RequestResult) {}

    fn on_profile_complete(&self, _summary: &ProfileSummary) {}

    fn on_session_complete(&self, _summary: &AggregateSummary) {}
}

/// Sink that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {}
