//! Extraction engine
//!
//! Drives the pager over one resource, hands each page's item list to the
//! sink as an atomic unit, and tracks the last item timestamp so the
//! caller can persist a resumable checkpoint. The engine holds no global
//! state; everything it learns per page is returned in the report.

mod types;

pub use types::{ExtractConfig, ExtractReport, RunStats};

use crate::error::Result;
use crate::http::HttpClient;
use crate::output::Sink;
use crate::pager::Pager;
use crate::pagination::last_start_time;
use crate::resources::Resource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Orchestrates one extraction run
pub struct Extractor<'a, S: Sink> {
    client: &'a HttpClient,
    sink: S,
    config: ExtractConfig,
}

impl<'a, S: Sink> Extractor<'a, S> {
    /// Create an extractor over the given client and sink
    pub fn new(client: &'a HttpClient, sink: S) -> Self {
        Self {
            client,
            sink,
            config: ExtractConfig::default(),
        }
    }

    /// Set the run configuration
    #[must_use]
    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    /// Extract all pages of a resource.
    ///
    /// Stops at end-of-stream, when the first page reports zero total
    /// elements, when the page bound is hit, or cooperatively when
    /// `shutdown` is set between pages. A fatal send error propagates and
    /// aborts the run; no page is ever partially handed off.
    pub async fn extract(
        &mut self,
        resource: &dyn Resource,
        shutdown: &AtomicBool,
    ) -> Result<ExtractReport> {
        let start = Instant::now();
        let mut stats = RunStats::default();
        let mut latest_timestamp = None;
        let mut interrupted = false;

        let mut pager = Pager::new(self.client, resource);

        while let Some(page) = pager.next_page().await? {
            if page.total_elements() == Some(0) {
                info!("No {} found", resource.name());
                break;
            }

            let records = page.records(resource.embedded_key());
            let path = self.sink.write_page(resource.name(), records)?;
            debug!(
                "Handed off page {} ({} records) to {}",
                stats.pages + 1,
                records.len(),
                path.display()
            );

            if let Some(ts) = last_start_time(records) {
                latest_timestamp = Some(ts.to_string());
            }

            stats.add_page();
            stats.add_records(records.len());

            if shutdown.load(Ordering::SeqCst) {
                info!("Interrupt received, stopping after current page");
                interrupted = true;
                break;
            }

            if self.config.max_pages > 0 && stats.pages as usize >= self.config.max_pages {
                info!("Page bound of {} reached", self.config.max_pages);
                break;
            }
        }

        stats.elapsed = start.elapsed();
        info!(
            "Extraction finished: {} pages, {} records in {:?}",
            stats.pages, stats.records, stats.elapsed
        );

        Ok(ExtractReport {
            stats,
            latest_timestamp,
            interrupted,
        })
    }

    /// Consume the extractor, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
