//! Data model shared by the engine and its observers

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A single absolute URL to warm
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlTarget(String);

impl UrlTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UrlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UrlTarget {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for UrlTarget {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl AsRef<str> for UrlTarget {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Named set of request headers and cookies a pass is made with
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub cookies: BTreeMap<String, String>,
}

impl Profile {
    /// Name of the profile used when none are configured
    pub const DEFAULT_NAME: &'static str = "default";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The implicit profile: no headers, no cookies
    pub fn default_profile() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }
}

/// Classification of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// Served from cache
    Hit,
    /// Completed exchange without a hit indicator, whatever the status
    Miss,
    /// Transport failure or timeout
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Hit => "HIT",
            Outcome::Miss => "MISS",
            Outcome::Error => "ERROR",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of warming one URL with one profile
#[derive(Debug, Clone, Serialize)]
pub struct RequestResult {
    pub url: UrlTarget,

    #[serde(serialize_with = "profile_name")]
    pub profile: Arc<Profile>,

    pub outcome: Outcome,

    pub status_code: Option<u16>,

    #[serde(with = "duration_secs")]
    pub latency: Duration,

    pub error_detail: Option<String>,

    /// Raw value of the cache header that was inspected, if any
    pub cache_indicator: Option<String>,
}

/// Outcome counts and ordered results of one profile pass
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub profile: Arc<Profile>,
    pub total: usize,
    pub hits: usize,
    pub misses: usize,
    pub errors: usize,
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
    /// In input URL order
    pub results: Vec<RequestResult>,
}

impl ProfileSummary {
    /// Share of completed URLs served from cache, in `[0, 1]`
    pub fn hit_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.hits as f64 / self.total as f64
        }
    }

    pub fn errored(&self) -> impl Iterator<Item = &RequestResult> {
        self.results
            .iter()
            .filter(|r| r.outcome == Outcome::Error)
    }
}

/// Totals across every profile of a session
#[derive(Debug, Clone, Serialize)]
pub struct AggregateSummary {
    pub per_profile: Vec<ProfileSummary>,
    pub total_requests: usize,
    pub total_hits: usize,
    pub total_misses: usize,
    pub total_errors: usize,
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

impl AggregateSummary {
    /// Sum the counts of finalized profile summaries
    pub fn from_profiles(per_profile: Vec<ProfileSummary>) -> Self {
        let mut summary = Self {
            per_profile: Vec::new(),
            total_requests: 0,
            total_hits: 0,
            total_misses: 0,
            total_errors: 0,
            elapsed: Duration::ZERO,
        };

        for profile in &per_profile {
            summary.total_requests += profile.total;
            summary.total_hits += profile.hits;
            summary.total_misses += profile.misses;
            summary.total_errors += profile.errors;
            summary.elapsed += profile.elapsed;
        }

        summary.per_profile = per_profile;
        summary
    }
}

fn profile_name<S>(profile: &Arc<Profile>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&profile.name)
}

/// Durations as fractional seconds
mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}
