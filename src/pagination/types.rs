//! Pagination types
//!
//! A cursor is an opaque set of query parameters produced only by a
//! resource's next-cursor function from the prior response body. It flows
//! from one page fetch's output to the next fetch's input and has no
//! existence beyond that hand-off.

use std::collections::HashMap;

/// Opaque pagination state used to request the next page
pub type Cursor = HashMap<String, String>;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these cursor parameters
    Continue {
        /// Query parameters to overlay on the next request
        query_params: Cursor,
    },
    /// End of stream
    Done,
}

impl NextPage {
    /// Create a continuation with cursor parameters
    pub fn with_params(params: Cursor) -> Self {
        Self::Continue {
            query_params: params,
        }
    }

    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert(key.into(), value.into());
        Self::Continue {
            query_params: params,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }

    /// Consume into the cursor, if any
    pub fn into_cursor(self) -> Option<Cursor> {
        match self {
            Self::Continue { query_params } => Some(query_params),
            Self::Done => None,
        }
    }
}
