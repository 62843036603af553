//! Cache-hit detection policy
//!
//! CDNs and reverse proxies disagree on how they report cache status
//! (`X-Cache: HIT`, `CF-Cache-Status: HIT`, `X-Cache: Hit from cloudfront`,
//! ...). Each [`CacheIndicator`] describes one convention; every configured
//! indicator is checked against a response and the first one that matches
//! marks it as a hit.

use crate::error::ConfigResult;
use crate::validation::{validate_header_name, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Cache detection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Header conventions checked on every response
    #[serde(default = "default_indicators")]
    pub indicators: Vec<CacheIndicator>,
}

/// A single header/value convention signalling a cache hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheIndicator {
    /// Response header name, matched case-insensitively
    pub header: String,

    /// Tokens that mark a hit when found anywhere in the header value
    /// (case-insensitive)
    #[serde(default = "default_hit_tokens")]
    pub hit_tokens: Vec<String>,
}

impl CacheIndicator {
    pub fn new(header: impl Into<String>, hit_tokens: &[&str]) -> Self {
        Self {
            header: header.into(),
            hit_tokens: hit_tokens.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            indicators: default_indicators(),
        }
    }
}

impl Validatable for CacheConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.indicators.is_empty() {
            return Err(self.validation_error("At least one cache indicator must be configured"));
        }

        for indicator in &self.indicators {
            indicator.validate()?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "cache"
    }
}

impl Validatable for CacheIndicator {
    fn validate(&self) -> ConfigResult<()> {
        validate_header_name(&self.header, "header", self.domain_name())?;

        if self.hit_tokens.is_empty() {
            return Err(self.validation_error(format!(
                "indicator '{}' needs at least one hit token",
                self.header
            )));
        }

        for token in &self.hit_tokens {
            validate_required_string(token, "hit_tokens", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "cache.indicators"
    }
}

fn default_indicators() -> Vec<CacheIndicator> {
    vec![CacheIndicator::new("x-cache", &["HIT"])]
}

fn default_hit_tokens() -> Vec<String> {
    vec!["HIT".to_string()]
}
