//! # Discovery Loader
//!
//! A retrying, paginated extraction engine for the Ticketmaster Discovery
//! API: a small state machine that turns the stateless REST API into a
//! reliable lazy sequence of response pages, tolerant of transient
//! failures, rate limiting, and the provider's pagination quirks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use discovery_loader::{Config, HttpClient, Pager, Result};
//! use discovery_loader::resources::Events;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let client = HttpClient::new(&config);
//!
//!     let mut pager = Pager::new(&client, &Events);
//!     while let Some(page) = pager.next_page().await? {
//!         for event in page.records("events") {
//!             // Process events
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        Pager                              │
//! │  next_page() → prepare → send (retry/backoff) → cursor    │
//! └───────────────────────────┬───────────────────────────────┘
//! ┌──────────┬───────────┬────┴──────────┬────────────────────┐
//! │   Auth   │   HTTP    │  Pagination   │     Resources      │
//! ├──────────┼───────────┼───────────────┼────────────────────┤
//! │ API Key  │ Retry     │ Offset links  │ Events             │
//! │ (query)  │ Backoff   │ Timestamp     │ Venues             │
//! │          │ Rate limit│ fallback      │ Attractions        │
//! └──────────┴───────────┴───────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy and result alias
pub mod error;

/// Runtime configuration
pub mod config;

/// API key authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Cursor types and the next-cursor algorithm
pub mod pagination;

/// Discovery API resources
pub mod resources;

/// Page state machine
pub mod pager;

/// Checkpoint persistence
pub mod state;

/// Page handoff sinks
pub mod output;

/// Extraction engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::Config;
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig, Page, PreparedRequest};
pub use pager::Pager;
pub use pagination::{Cursor, NextPage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
