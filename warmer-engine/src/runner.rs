//! One profile pass over the full URL list

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::model::{Outcome, Profile, ProfileSummary, RequestResult, UrlTarget};
use crate::pool::{CompletedItem, WorkItem, WorkerPool};
use crate::progress::ProgressSink;

/// Drives the worker pool for a single profile and assembles its summary
#[derive(Clone)]
pub struct ProfileRunner {
    pool: WorkerPool,
    sink: Arc<dyn ProgressSink>,
}

/// Results gathered while the pool is running
struct Collected {
    slots: Vec<Option<RequestResult>>,
    hits: usize,
    misses: usize,
    errors: usize,
    duplicate: Option<usize>,
}

impl Collected {
    fn new(total: usize) -> Self {
        Self {
            slots: (0..total).map(|_| None).collect(),
            hits: 0,
            misses: 0,
            errors: 0,
            duplicate: None,
        }
    }

    /// Place a result in its input slot; refuses a slot that is already
    /// filled (or out of range)
    fn accept(&mut self, index: usize, result: RequestResult) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_none() => {
                match result.outcome {
                    Outcome::Hit => self.hits += 1,
                    Outcome::Miss => self.misses += 1,
                    Outcome::Error => self.errors += 1,
                }
                *slot = Some(result);
                true
            }
            _ => {
                self.duplicate.get_or_insert(index);
                false
            }
        }
    }
}

impl ProfileRunner {
    pub fn new(pool: WorkerPool, sink: Arc<dyn ProgressSink>) -> Self {
        Self { pool, sink }
    }

    /// Warm every URL with `profile` and return the finalized summary.
    ///
    /// Progress is pushed to the sink as results arrive; the summary lists
    /// results in input order.
    pub async fn run_profile(
        &self,
        urls: &[UrlTarget],
        profile: Arc<Profile>,
        concurrency: usize,
        timeout: Duration,
    ) -> EngineResult<ProfileSummary> {
        let total = urls.len();
        let started = Instant::now();

        info!(
            "Warming {} URLs with profile '{}' ({} workers)",
            total, profile.name, concurrency
        );
        self.sink.profile_started(&profile, total);

        let items: Vec<WorkItem> = urls
            .iter()
            .enumerate()
            .map(|(index, url)| WorkItem {
                index,
                url: url.clone(),
                profile: profile.clone(),
            })
            .collect();

        let (tx, mut rx) = mpsc::channel::<CompletedItem>(concurrency.min(total).max(1));

        let dispatch = self.pool.run(items, concurrency, timeout, tx);
        let collect = async {
            let mut collected = Collected::new(total);
            let mut completed = 0;

            while let Some(CompletedItem { index, result }) = rx.recv().await {
                self.sink.on_result(&result);
                if collected.accept(index, result) {
                    completed += 1;
                    self.sink.on_progress(completed, total, &profile.name);
                }
            }

            collected
        };

        let (dispatched, collected) = tokio::join!(dispatch, collect);
        dispatched?;

        if let Some(index) = collected.duplicate {
            return Err(EngineError::DuplicateResult {
                profile: profile.name.clone(),
                index,
            });
        }

        let missing = collected.slots.iter().filter(|slot| slot.is_none()).count();
        if missing > 0 {
            return Err(EngineError::IncompleteProfile {
                profile: profile.name.clone(),
                missing,
            });
        }

        let summary = ProfileSummary {
            profile: profile.clone(),
            total,
            hits: collected.hits,
            misses: collected.misses,
            errors: collected.errors,
            elapsed: started.elapsed(),
            results: collected.slots.into_iter().flatten().collect(),
        };

        info!(
            "Profile '{}' done in {:.2}s: {} HIT, {} MISS, {} ERROR",
            profile.name,
            summary.elapsed.as_secs_f64(),
            summary.hits,
            summary.misses,
            summary.errors
        );
        self.sink.on_profile_complete(&summary);

        Ok(summary)
    }
}
