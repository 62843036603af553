//! Fixed-width worker pool
//!
//! `run` spawns `min(concurrency, items)` Tokio tasks. Each worker pops the
//! next item from a shared queue, performs one exchange under its own
//! deadline, and sends the classified result down an mpsc channel. A worker
//! only ever has one exchange in flight, so the pool never exceeds
//! `concurrency` concurrent requests.
//!
//! The queue lock is held for a `pop_front` only, never across a network
//! call. Expiry of the deadline drops the in-flight request future, which
//! closes its connection, and the item is reported as an `Error` with detail
//! `"timeout"`. Every item yields exactly one result.

use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::classifier::CacheClassifier;
use crate::error::{EngineError, EngineResult};
use crate::model::{Profile, RequestResult, UrlTarget};
use warmer_http::{HttpClient, HttpError};

/// One (URL, profile) pair to warm; `index` is the URL's input position
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub index: usize,
    pub url: UrlTarget,
    pub profile: Arc<Profile>,
}

/// A finished work item
#[derive(Debug)]
pub struct CompletedItem {
    pub index: usize,
    pub result: RequestResult,
}

/// Executes work items against a shared HTTP client
#[derive(Clone)]
pub struct WorkerPool {
    client: Arc<dyn HttpClient>,
    classifier: Arc<CacheClassifier>,
}

impl WorkerPool {
    pub fn new(client: Arc<dyn HttpClient>, classifier: CacheClassifier) -> Self {
        Self {
            client,
            classifier: Arc::new(classifier),
        }
    }

    pub fn classifier(&self) -> &CacheClassifier {
        &self.classifier
    }

    /// Run every item and push one [`CompletedItem`] per item to `results`,
    /// in completion order. Returns once all workers have drained the queue.
    pub async fn run(
        &self,
        items: Vec<WorkItem>,
        concurrency: usize,
        timeout: Duration,
        results: mpsc::Sender<CompletedItem>,
    ) -> EngineResult<()> {
        if concurrency == 0 {
            return Err(EngineError::InvalidConcurrency(concurrency));
        }

        let workers = concurrency.min(items.len());
        debug!(
            "Spawning {} workers for {} work items (timeout {:?})",
            workers,
            items.len(),
            timeout
        );

        let queue = Arc::new(Mutex::new(VecDeque::from(items)));
        let handles: Vec<_> = (0..workers)
            .map(|worker_id| {
                tokio::spawn(worker_loop(
                    worker_id,
                    queue.clone(),
                    self.client.clone(),
                    self.classifier.clone(),
                    timeout,
                    results.clone(),
                ))
            })
            .collect();

        // Workers hold the only remaining senders; the receiver sees the end of
        // the stream once the last one exits
        drop(results);

        for handle in join_all(handles).await {
            handle.map_err(|e| EngineError::WorkerFailed(e.to_string()))?;
        }

        Ok(())
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: Arc<Mutex<VecDeque<WorkItem>>>,
    client: Arc<dyn HttpClient>,
    classifier: Arc<CacheClassifier>,
    timeout: Duration,
    results: mpsc::Sender<CompletedItem>,
) -> usize {
    let mut processed = 0;

    loop {
        let next = queue.lock().pop_front();
        let Some(item) = next else {
            break;
        };

        let result = execute(client.as_ref(), &classifier, &item.url, &item.profile, timeout).await;
        processed += 1;

        if results
            .send(CompletedItem {
                index: item.index,
                result,
            })
            .await
            .is_err()
        {
            debug!("Worker {} stopping: result receiver closed", worker_id);
            break;
        }
    }

    trace!("Worker {} finished after {} items", worker_id, processed);
    processed
}

/// Perform a single exchange under `timeout` and classify it
pub async fn execute(
    client: &dyn HttpClient,
    classifier: &CacheClassifier,
    url: &UrlTarget,
    profile: &Arc<Profile>,
    timeout: Duration,
) -> RequestResult {
    let start = Instant::now();
    let exchange = match tokio::time::timeout(
        timeout,
        client.get(url.as_str(), &profile.headers, &profile.cookies),
    )
    .await
    {
        Ok(exchange) => exchange,
        Err(_) => Err(HttpError::Timeout),
    };
    let latency = start.elapsed();
    let outcome = classifier.classify(&exchange);

    match exchange {
        Ok(response) => RequestResult {
            url: url.clone(),
            profile: profile.clone(),
            outcome,
            status_code: Some(response.status),
            latency,
            error_detail: None,
            cache_indicator: classifier.indicator_value(&response),
        },
        Err(err) => {
            warn!(
                url = %url,
                profile = %profile.name,
                "Error running request: {}",
                err
            );
            RequestResult {
                url: url.clone(),
                profile: profile.clone(),
                outcome,
                status_code: None,
                latency,
                error_detail: Some(err.to_string()),
                cache_indicator: None,
            }
        }
    }
}
