//! HTTP client with request preparation and retrying send
//!
//! The client owns the credential, the static params, and the retry
//! policy. `prepare_request` resolves a resource and cursor into an
//! immutable request; `send` drives the bounded retry loop, classifying
//! every failure through the error taxonomy.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::ApiKeyAuthenticator;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::pagination::Cursor;
use crate::resources::Resource;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Methods allowed to carry structured query parameters
const BODY_REQUEST_METHODS: [Method; 4] =
    [Method::GET, Method::POST, Method::PUT, Method::PATCH];

/// Configuration for the HTTP client's retry and transport behavior
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// HTTP method for all requests
    pub method: Method,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum attempts for one page fetch, including the first
    pub max_attempts: u32,
    /// Backoff time unit; the nth retry waits `2^n` of these
    pub backoff_unit: Duration,
    /// Fixed wait after a 429, much shorter than the general backoff
    /// because rate limiting is expected to clear quickly
    pub rate_limit_interval: Duration,
    /// Client-side rate limiter, distinct from the reactive 429 wait
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            method: Method::GET,
            timeout: Duration::from_secs(30),
            max_attempts: 5,
            backoff_unit: Duration::from_secs(1),
            rate_limit_interval: Duration::from_millis(200),
            rate_limit: Some(RateLimiterConfig::default()),
            user_agent: format!("discovery-loader/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the HTTP method
    pub fn method(mut self, method: Method) -> Self {
        self.config.method = method;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the attempt bound
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set the backoff time unit
    pub fn backoff_unit(mut self, unit: Duration) -> Self {
        self.config.backoff_unit = unit;
        self
    }

    /// Set the fixed 429 retry interval
    pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
        self.config.rate_limit_interval = interval;
        self
    }

    /// Set the client-side rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable client-side rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// An immutable, fully resolved request, independent of client state and
/// safe to retry byte-for-byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters, auth and cursor already merged
    pub query: HashMap<String, String>,
}

/// The raw response for one fetch
#[derive(Debug, Clone)]
pub struct Page {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl Page {
    /// Items embedded in this page under the given key, empty when absent
    pub fn records(&self, embedded_key: &str) -> &[Value] {
        self.body
            .pointer(&format!("/_embedded/{embedded_key}"))
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }

    /// The page's reported total element count
    pub fn total_elements(&self) -> Option<u64> {
        self.body
            .pointer("/page/totalElements")
            .and_then(Value::as_u64)
    }
}

/// HTTP client with retrying send
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    base_url: String,
    params: HashMap<String, String>,
    authenticator: ApiKeyAuthenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client from the run configuration with default HTTP settings
    pub fn new(config: &Config) -> Self {
        Self::with_http_config(config, HttpClientConfig::default())
    }

    /// Create a client with custom HTTP settings
    pub fn with_http_config(config: &Config, http_config: HttpClientConfig) -> Self {
        let client = Client::builder()
            .timeout(http_config.timeout)
            .user_agent(&http_config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        let rate_limiter = http_config.rate_limit.as_ref().map(RateLimiter::new);

        Self {
            client,
            config: http_config,
            base_url: config.base_url.clone(),
            params: config.params.clone(),
            authenticator: ApiKeyAuthenticator::new(&config.api_key),
            rate_limiter,
        }
    }

    /// Build an immutable request for a resource and cursor.
    ///
    /// Query parameters are assembled with later entries overriding earlier
    /// ones: resource defaults, then auth params, then static config
    /// params, then the cursor. A method outside GET/POST/PUT/PATCH is a
    /// configuration error surfaced immediately, never retried.
    pub fn prepare_request(
        &self,
        resource: &dyn Resource,
        cursor: Option<&Cursor>,
    ) -> Result<PreparedRequest> {
        if !BODY_REQUEST_METHODS.contains(&self.config.method) {
            return Err(Error::MethodNotAllowed {
                message: format!("Method {} not allowed", self.config.method),
            });
        }

        let url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            resource.path()
        );

        let mut query = resource.default_params();
        query.extend(self.authenticator.query_params());
        query.extend(self.params.clone());
        if let Some(cursor) = cursor {
            query.extend(cursor.clone());
        }

        Ok(PreparedRequest {
            method: self.config.method.clone(),
            url,
            headers: resource.headers(cursor),
            query,
        })
    }

    /// Send a prepared request, retrying up to the attempt bound.
    ///
    /// Unauthorized fails fast: bad credentials will not self-heal and the
    /// run must stop. 429 waits the fixed rate-limit interval; any other
    /// failure waits `2^attempt` backoff units. Classification happens on
    /// every non-success response so the error surfaced after exhaustion
    /// carries the last attempt's status and message.
    pub async fn send(&self, request: &PreparedRequest) -> Result<Page> {
        let mut attempt: u32 = 0;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            match self.dispatch(request).await {
                Ok(page) => {
                    debug!("{} {} succeeded", request.method, request.url);
                    return Ok(page);
                }
                Err(err) => {
                    attempt += 1;

                    if !err.is_retryable() {
                        error!("Unauthorized request, check your API key: {err}");
                        return Err(err);
                    }

                    if attempt >= self.config.max_attempts {
                        error!("Request failed after {attempt} attempts: {err}");
                        return Err(err);
                    }

                    let delay = match err {
                        Error::RateLimitReached { .. } => {
                            warn!(
                                "Rate limit exceeded, retrying after {:?}",
                                self.config.rate_limit_interval
                            );
                            self.config.rate_limit_interval
                        }
                        _ => {
                            let delay = self.backoff_delay(attempt);
                            warn!(
                                "Request failed with error: {err}, attempt {}/{}, retrying after {:?}",
                                attempt, self.config.max_attempts, delay
                            );
                            delay
                        }
                    };

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Exponential backoff delay for the nth retry: `2^n` backoff units
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.config.backoff_unit * 2u32.saturating_pow(attempt)
    }

    /// One attempt: send the request and classify the outcome
    async fn dispatch(&self, request: &PreparedRequest) -> Result<Page> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .query(&request.query);

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(Error::Transport)?;
        let status = response.status();
        let headers = response.headers().clone();

        if status.is_success() {
            let body: Value = response.json().await.map_err(Error::Transport)?;
            return Ok(Page {
                status: status.as_u16(),
                headers,
                body,
            });
        }

        let message = response.text().await.unwrap_or_default();
        Err(Error::from_status(status.as_u16(), message))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
