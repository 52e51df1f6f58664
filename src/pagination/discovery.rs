//! Next-cursor algorithm for the Discovery API
//!
//! The provider rejects any request beyond element offset 1000 with a 400,
//! so offset-based `next` links can only be followed while
//! `size * (number + 1) < 1000`. Past that ceiling the cursor switches to a
//! `startDateTime` taken from the last item of the current page, which
//! assumes records arrive in ascending start-time order. That ordering is a
//! precondition guaranteed by the static `sort` param, not verified here.

use super::types::{Cursor, NextPage};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Maximum element offset the provider will serve
pub const MAX_PAGE_DEPTH: u64 = 1000;

/// Derive the next cursor from a response body.
///
/// `embedded_key` names the item list under `_embedded` (e.g. "events").
/// Pure function of the body; calling it twice on the same body yields the
/// same result.
pub fn discovery_next_page(body: &Value, embedded_key: &str) -> NextPage {
    let next_href = body
        .pointer("/_links/next/href")
        .and_then(Value::as_str);

    let size = body.pointer("/page/size").and_then(Value::as_u64);
    let number = body.pointer("/page/number").and_then(Value::as_u64);
    let within_depth = match (size, number) {
        (Some(size), Some(number)) => size * (number + 1) < MAX_PAGE_DEPTH,
        _ => false,
    };

    if let Some(href) = next_href {
        if within_depth {
            return NextPage::with_params(parse_link_query(href));
        }
    }

    // Offset ceiling reached or no link left: restart offset pagination
    // from the last item's start time.
    let items = embedded_items(body, embedded_key);
    if let Some(last) = items.last() {
        match item_start_time(last) {
            Some(start) => return NextPage::with_param("startDateTime", start),
            None => {
                warn!(
                    "last {} item has no dates.start.dateTime, ending stream",
                    embedded_key
                );
                return NextPage::Done;
            }
        }
    }

    NextPage::Done
}

/// Start time of the last item in a page's item list, used by callers to
/// persist a resumable checkpoint
pub fn last_start_time(items: &[Value]) -> Option<&str> {
    items.last().and_then(item_start_time)
}

/// Parse the query string of a pagination link into a flat cursor.
///
/// Discovery `next` hrefs are server-relative
/// (`/discovery/v2/events.json?page=1&size=200`), so only the part after
/// `?` is considered.
pub fn parse_link_query(href: &str) -> Cursor {
    let query = href.split_once('?').map_or("", |(_, q)| q);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<HashMap<_, _>>()
}

fn embedded_items<'a>(body: &'a Value, embedded_key: &str) -> &'a [Value] {
    body.pointer(&format!("/_embedded/{embedded_key}"))
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

fn item_start_time(item: &Value) -> Option<&str> {
    item.pointer("/dates/start/dateTime").and_then(Value::as_str)
}
