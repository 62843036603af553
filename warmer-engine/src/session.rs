//! Warming session: every profile, in order, then aggregate

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::classifier::CacheClassifier;
use crate::error::{EngineError, EngineResult};
use crate::model::{AggregateSummary, Profile, UrlTarget};
use crate::pool::WorkerPool;
use crate::progress::ProgressSink;
use crate::runner::ProfileRunner;
use warmer_http::HttpClient;

/// Top-level driver of a warming run
///
/// Holds no state between runs; `run` can be called again from scratch.
#[derive(Clone)]
pub struct WarmingSession {
    runner: ProfileRunner,
    sink: Arc<dyn ProgressSink>,
}

impl WarmingSession {
    pub fn new(
        client: Arc<dyn HttpClient>,
        classifier: CacheClassifier,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        let pool = WorkerPool::new(client, classifier);
        Self {
            runner: ProfileRunner::new(pool, sink.clone()),
            sink,
        }
    }

    /// Warm every URL once per profile.
    ///
    /// Profiles run one after the other, so at most `concurrency` requests are
    /// in flight at any time. An empty profile list runs the implicit
    /// `default` profile. Fails before dispatching anything when there are no
    /// URLs, `concurrency` is zero or `timeout` is zero; individual request
    /// failures only show up as `Error` results.
    pub async fn run(
        &self,
        urls: &[UrlTarget],
        profiles: &[Profile],
        concurrency: usize,
        timeout: Duration,
    ) -> EngineResult<AggregateSummary> {
        if urls.is_empty() {
            return Err(EngineError::NoUrls);
        }
        if concurrency == 0 {
            return Err(EngineError::InvalidConcurrency(concurrency));
        }
        if timeout.is_zero() {
            return Err(EngineError::InvalidTimeout);
        }

        let profiles = effective_profiles(profiles);
        info!(
            "Warming {} URLs across {} profile(s)",
            urls.len(),
            profiles.len()
        );

        let mut per_profile = Vec::with_capacity(profiles.len());
        for (stage, profile) in profiles.into_iter().enumerate() {
            info!("Stage {}: {}", stage + 1, profile.name);
            let summary = self
                .runner
                .run_profile(urls, Arc::new(profile), concurrency, timeout)
                .await?;
            per_profile.push(summary);
        }

        let summary = AggregateSummary::from_profiles(per_profile);
        info!(
            "Session done: {} requests, {} HIT, {} MISS, {} ERROR",
            summary.total_requests, summary.total_hits, summary.total_misses, summary.total_errors
        );
        self.sink.on_session_complete(&summary);

        Ok(summary)
    }
}

/// The profiles a session actually runs: the configured ones, or the single
/// implicit default profile when none are configured
pub fn effective_profiles(profiles: &[Profile]) -> Vec<Profile> {
    if profiles.is_empty() {
        vec![Profile::default_profile()]
    } else {
        profiles.to_vec()
    }
}
