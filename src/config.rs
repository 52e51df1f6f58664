//! Runtime configuration
//!
//! The configuration is constructed once per run and read-only thereafter.
//! `params` seeds default query values (page size, sort order, start
//! timestamp) merged into every request; per-request cursor values take
//! precedence over them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default Discovery API base URL
pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "TICKETMASTER_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_VAR: &str = "TICKETMASTER_BASE_URL";

/// Immutable client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL for all requests
    pub base_url: String,
    /// API key for the `apikey` query parameter
    pub api_key: String,
    /// Static query parameters merged into every request
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl Config {
    /// Create a configuration with the given base URL and API key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            params: HashMap::new(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Reads a `.env` file if present. `TICKETMASTER_API_KEY` is required;
    /// `TICKETMASTER_BASE_URL` falls back to the public Discovery endpoint.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var(API_KEY_VAR).map_err(|_| Error::MissingEnvVar {
            name: API_KEY_VAR.to_string(),
        })?;
        let base_url =
            std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(base_url, api_key))
    }

    /// Add a static query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replace the static query parameters
    #[must_use]
    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }
}
