//! Cache outcome classification
//!
//! Maps a finished exchange to HIT / MISS / ERROR using the configured cache
//! indicator conventions. Pure: no I/O, no state beyond the rule set.

use crate::model::Outcome;
use warmer_config::domains::cache::{CacheConfig, CacheIndicator};
use warmer_http::{HttpError, HttpResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
struct HitRule {
    /// Lower-cased header name
    header: String,
    /// Upper-cased tokens
    tokens: Vec<String>,
}

impl HitRule {
    fn matches(&self, value: &str) -> bool {
        let value = value.to_ascii_uppercase();
        self.tokens.iter().any(|token| value.contains(token.as_str()))
    }
}

/// Classifies exchanges against a list of cache-hit header conventions
///
/// Every rule is checked; the first whose header is present with a value
/// containing one of its hit tokens makes the response a HIT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheClassifier {
    rules: Vec<HitRule>,
}

impl CacheClassifier {
    pub fn new(indicators: &[CacheIndicator]) -> Self {
        let rules = indicators
            .iter()
            .map(|indicator| HitRule {
                header: indicator.header.trim().to_ascii_lowercase(),
                tokens: indicator
                    .hit_tokens
                    .iter()
                    .map(|t| t.trim().to_ascii_uppercase())
                    .filter(|t| !t.is_empty())
                    .collect(),
            })
            .collect();

        Self { rules }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(&config.indicators)
    }

    /// Outcome of an exchange: transport failures are `Error`, a matching
    /// cache indicator is `Hit` whatever the status, anything else is `Miss`
    pub fn classify(&self, exchange: &Result<HttpResponse, HttpError>) -> Outcome {
        match exchange {
            Err(_) => Outcome::Error,
            Ok(response) if self.hit_value(response).is_some() => Outcome::Hit,
            Ok(_) => Outcome::Miss,
        }
    }

    /// Cache header value worth reporting for a response: the one that made
    /// it a hit, otherwise the first configured header present
    pub fn indicator_value(&self, response: &HttpResponse) -> Option<String> {
        self.hit_value(response)
            .or_else(|| {
                self.rules
                    .iter()
                    .find_map(|rule| response.header(&rule.header))
            })
            .map(str::to_string)
    }

    fn hit_value<'a>(&self, response: &'a HttpResponse) -> Option<&'a str> {
        self.rules.iter().find_map(|rule| {
            response
                .header(&rule.header)
                .filter(|value| rule.matches(value))
        })
    }
}

impl Default for CacheClassifier {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
