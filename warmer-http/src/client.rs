//! HTTP client implementation

use crate::config::HttpConfig;
use crate::errors::HttpError;
use crate::types::{cookie_header, HttpResponse};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, COOKIE},
    Client,
};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use tracing::{debug, trace};

/// HTTP client trait the warming engine dispatches through
///
/// Implementations must be cheap to share between workers; the engine holds
/// one instance behind an `Arc` for the whole session.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET for `url` carrying the given request headers and cookies.
    ///
    /// A completed exchange is `Ok` whatever its status code; `Err` is reserved
    /// for transport failures.
    async fn get(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        cookies: &BTreeMap<String, String>,
    ) -> Result<HttpResponse, HttpError>;
}

/// HTTP Manager wrapping a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpManager {
    client: Client,
    config: HttpConfig,
}

impl HttpManager {
    /// Create a new HttpManager with default configuration
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a new HttpManager with specific configuration
    pub fn with_config(config: HttpConfig) -> Result<Self, HttpError> {
        debug!(
            "Creating HttpManager (user agent: {}, connect timeout: {}s)",
            config.user_agent,
            config.connect_timeout.as_secs()
        );

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .redirect(reqwest::redirect::Policy::limited(
                config.max_redirects as usize,
            ))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| HttpError::ConfigError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn build_headers(
        headers: &BTreeMap<String, String>,
        cookies: &BTreeMap<String, String>,
    ) -> Result<HeaderMap, HttpError> {
        let mut header_map = HeaderMap::with_capacity(headers.len() + 1);

        for (key, value) in headers {
            let header_name = HeaderName::from_str(key)
                .map_err(|_| HttpError::InvalidHeaderName(key.to_string()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| HttpError::InvalidHeaderValue(key.to_string()))?;
            header_map.insert(header_name, header_value);
        }

        if let Some(cookie) = cookie_header(cookies) {
            let value = HeaderValue::from_str(&cookie)
                .map_err(|_| HttpError::InvalidHeaderValue(COOKIE.to_string()))?;
            header_map.insert(COOKIE, value);
        }

        Ok(header_map)
    }
}

#[async_trait::async_trait]
impl HttpClient for HttpManager {
    async fn get(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        cookies: &BTreeMap<String, String>,
    ) -> Result<HttpResponse, HttpError> {
        let header_map = Self::build_headers(headers, cookies)?;

        debug!("Sending GET {} with {} headers", url, header_map.len());
        let response = self.client.get(url).headers(header_map).send().await?;

        let status = response.status().as_u16();

        // Header values that are not visible ASCII cannot be matched against
        // cache tokens anyway
        let response_headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        // Read the body to completion so the origin finishes generating the
        // response and the cache in front of it can store it
        let body = response.bytes().await?;

        let response = HttpResponse {
            status,
            headers: response_headers,
            body_bytes: body.len(),
        };
        if response.is_success() {
            trace!("GET {} -> {} ({} bytes)", url, status, body.len());
        } else {
            debug!("GET {} -> non-success status {}", url, status);
        }

        Ok(response)
    }
}
