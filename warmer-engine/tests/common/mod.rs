//! Test doubles shared by the engine integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use warmer_engine::{AggregateSummary, Profile, ProfileSummary, ProgressSink, RequestResult};
use warmer_http::{HttpClient, HttpError, HttpResponse};

/// What the stub does for one URL
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, Vec<(&'static str, &'static str)>),
    Refused,
}

#[derive(Debug, Clone)]
pub struct Step {
    pub delay: Duration,
    pub reply: Reply,
}

/// A request the stub received
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub cookies: BTreeMap<String, String>,
}

/// Client answering from a per-URL script, on the Tokio clock
#[derive(Default)]
pub struct ScriptedClient {
    steps: HashMap<String, Step>,
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, delay_ms: u64, reply: Reply) -> Self {
        self.steps.insert(
            url.to_string(),
            Step {
                delay: Duration::from_millis(delay_ms),
                reply,
            },
        );
        self
    }

    pub fn hit(self, url: &str, delay_ms: u64) -> Self {
        self.route(url, delay_ms, Reply::Status(200, vec![("X-Cache", "HIT")]))
    }

    pub fn miss(self, url: &str, delay_ms: u64) -> Self {
        self.route(url, delay_ms, Reply::Status(200, vec![("X-Cache", "MISS")]))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn get(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        cookies: &BTreeMap<String, String>,
    ) -> Result<HttpResponse, HttpError> {
        self.calls.lock().push(Call {
            url: url.to_string(),
            headers: headers.clone(),
            cookies: cookies.clone(),
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let step = self.steps.get(url).cloned().unwrap_or(Step {
            delay: Duration::from_millis(10),
            reply: Reply::Status(200, Vec::new()),
        });
        tokio::time::sleep(step.delay).await;

        match step.reply {
            Reply::Status(status, headers) => Ok(headers
                .into_iter()
                .fold(HttpResponse::new(status), |r, (k, v)| r.with_header(k, v))),
            Reply::Refused => Err(HttpError::Connection(format!(
                "error sending request for url ({url}): connection refused"
            ))),
        }
    }
}

/// Sink that records every notification
#[derive(Default)]
pub struct RecordingSink {
    pub started: Mutex<Vec<(String, usize)>>,
    pub progress: Mutex<Vec<(usize, usize, String)>>,
    pub results: Mutex<Vec<String>>,
    pub profiles: Mutex<Vec<String>>,
    pub sessions: AtomicUsize,
}

impl ProgressSink for RecordingSink {
    fn profile_started(&self, profile: &Profile, total: usize) {
        self.started.lock().push((profile.name.clone(), total));
    }

    fn on_progress(&self, completed: usize, total: usize, profile_name: &str) {
        self.progress
            .lock()
            .push((completed, total, profile_name.to_string()));
    }

    fn on_result(&self, result: &RequestResult) {
        self.results.lock().push(result.url.to_string());
    }

    fn on_profile_complete(&self, summary: &ProfileSummary) {
        self.profiles.lock().push(summary.profile.name.clone());
    }

    fn on_session_complete(&self, _summary: &AggregateSummary) {
        self.sessions.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn url(n: usize) -> String {
    format!("http://cache.test/page/{n}")
}
