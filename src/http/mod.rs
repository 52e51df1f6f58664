//! HTTP client module
//!
//! Request construction, authentication injection, error classification,
//! and the bounded retry/backoff loop.
//!
//! Requests are fully resolved into an immutable [`PreparedRequest`] before
//! sending, so a retry re-sends the identical request. The sender blocks
//! through backoff waits; one request is in flight at a time.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, Page, PreparedRequest};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
