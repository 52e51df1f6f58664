//! Page state machine
//!
//! The pager turns the stateless API into a lazy, single-pass, forward-only
//! sequence of pages. Each pull prepares one request from the current
//! cursor, sends it through the retrying sender, then asks the resource for
//! the next cursor. Once the stream ends no further requests are issued;
//! the sequence is not restartable. Resuming a prior run means seeding the
//! static `startDateTime` param, which is the caller's concern.

use crate::error::Result;
use crate::http::{HttpClient, Page};
use crate::pagination::Cursor;
use crate::resources::Resource;

/// Pull-based pagination over one resource
pub struct Pager<'a> {
    client: &'a HttpClient,
    resource: &'a dyn Resource,
    cursor: Option<Cursor>,
    done: bool,
}

impl<'a> Pager<'a> {
    /// Create a pager starting at the first page (no cursor)
    pub fn new(client: &'a HttpClient, resource: &'a dyn Resource) -> Self {
        Self {
            client,
            resource,
            cursor: None,
            done: false,
        }
    }

    /// Fetch the next page, or `None` once the stream has ended.
    ///
    /// A fatal send error ends the stream; the error propagates to the
    /// caller and no further requests are issued.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        if self.done {
            return Ok(None);
        }

        let request = self
            .client
            .prepare_request(self.resource, self.cursor.as_ref())?;
        let page = match self.client.send(&request).await {
            Ok(page) => page,
            Err(err) => {
                self.done = true;
                return Err(err);
            }
        };

        self.cursor = self.resource.next_page(&page.body).into_cursor();
        if self.cursor.is_none() {
            self.done = true;
        }

        Ok(Some(page))
    }

    /// The cursor that will drive the next fetch, if any
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Whether the terminal state has been reached
    pub fn is_done(&self) -> bool {
        self.done
    }
}
