//! Pagination module
//!
//! The Discovery API paginates with offset-based `page` links up to a hard
//! element-offset ceiling, then requires switching to timestamp-based
//! pagination. This module holds the cursor types and the shared
//! next-cursor algorithm used by all resources.

mod discovery;
mod types;

pub use discovery::{discovery_next_page, last_start_time, parse_link_query, MAX_PAGE_DEPTH};
pub use types::{Cursor, NextPage};

#[cfg(test)]
mod tests;
