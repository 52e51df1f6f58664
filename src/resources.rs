//! Discovery API resources
//!
//! Events, venues, and attractions are endpoint variants of the same API.
//! They share one pagination algorithm and default parameter policy,
//! varying only in sub-path and the `_embedded` key their items live under.

use crate::pagination::{discovery_next_page, Cursor, NextPage};
use serde_json::Value;
use std::collections::HashMap;

/// Default page size requested from the API
pub const DEFAULT_PAGE_SIZE: &str = "200";

/// Default sort order. Ascending start time is a precondition of the
/// timestamp-based pagination fallback.
pub const DEFAULT_SORT: &str = "date,name,asc";

/// Default extraction start timestamp
pub const DEFAULT_START_DATE_TIME: &str = "2022-01-01T00:00:00Z";

/// A named API endpoint variant sharing the Discovery pagination algorithm
pub trait Resource: Send + Sync {
    /// Resource name, used for logging and output file naming
    fn name(&self) -> &'static str;

    /// Sub-path appended to the configured base URL
    fn path(&self) -> &'static str;

    /// Key under `_embedded` holding this resource's item list
    fn embedded_key(&self) -> &'static str;

    /// Headers for a request. The Discovery API needs none; the cursor is
    /// available for providers that carry pagination state in headers.
    fn headers(&self, _cursor: Option<&Cursor>) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Hardcoded default query parameters, overridable by static config
    /// params and the cursor
    fn default_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("size".to_string(), DEFAULT_PAGE_SIZE.to_string());
        params.insert("sort".to_string(), DEFAULT_SORT.to_string());
        params.insert(
            "startDateTime".to_string(),
            DEFAULT_START_DATE_TIME.to_string(),
        );
        params
    }

    /// Derive the next cursor from a response body
    fn next_page(&self, body: &Value) -> NextPage {
        discovery_next_page(body, self.embedded_key())
    }
}

/// The `/events.json` endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct Events;

impl Resource for Events {
    fn name(&self) -> &'static str {
        "events"
    }

    fn path(&self) -> &'static str {
        "/events.json"
    }

    fn embedded_key(&self) -> &'static str {
        "events"
    }
}

/// The `/venues.json` endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct Venues;

impl Resource for Venues {
    fn name(&self) -> &'static str {
        "venues"
    }

    fn path(&self) -> &'static str {
        "/venues.json"
    }

    fn embedded_key(&self) -> &'static str {
        "venues"
    }
}

/// The `/attractions.json` endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct Attractions;

impl Resource for Attractions {
    fn name(&self) -> &'static str {
        "attractions"
    }

    fn path(&self) -> &'static str {
        "/attractions.json"
    }

    fn embedded_key(&self) -> &'static str {
        "attractions"
    }
}
