//! Engine types
//!
//! Run configuration, statistics, and the extraction report handed back to
//! the caller for checkpointing.

use std::time::Duration;

/// Configuration for one extraction run
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    /// Maximum pages to fetch (0 = unlimited)
    pub max_pages: usize,
}

impl ExtractConfig {
    /// Create a new extract config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page bound
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Statistics accumulated during a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    /// Pages fetched and handed off
    pub pages: u64,
    /// Records handed off
    pub records: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStats {
    /// Count one handed-off page
    pub fn add_page(&mut self) {
        self.pages += 1;
    }

    /// Count handed-off records
    pub fn add_records(&mut self, count: usize) {
        self.records += count as u64;
    }
}

/// Outcome of a completed (or interrupted) run
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// Run statistics
    pub stats: RunStats,
    /// Start time of the last item in the last fully processed page, the
    /// caller's resumable checkpoint
    pub latest_timestamp: Option<String>,
    /// Whether the run was stopped by an interrupt rather than
    /// end-of-stream
    pub interrupted: bool,
}
