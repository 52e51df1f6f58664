//! Tests for the next-cursor algorithm

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;

fn page_body(size: u64, number: u64, next_href: Option<&str>, items: Vec<serde_json::Value>) -> serde_json::Value {
    let mut body = json!({
        "page": {
            "size": size,
            "number": number,
            "totalElements": 5000,
        },
        "_embedded": { "events": items },
        "_links": {
            "self": { "href": format!("/discovery/v2/events.json?page={number}&size={size}") },
        }
    });
    if let Some(href) = next_href {
        body["_links"]["next"] = json!({ "href": href });
    }
    body
}

fn event(start: &str) -> serde_json::Value {
    json!({
        "id": "evt",
        "name": "Concert",
        "dates": { "start": { "dateTime": start } }
    })
}

#[test]
fn test_next_link_within_depth_yields_parsed_query() {
    let body = page_body(
        200,
        0,
        Some("/discovery/v2/events.json?page=1&size=200&sort=date%2Cname%2Casc"),
        vec![event("2022-06-01T00:00:00Z")],
    );

    let next = discovery_next_page(&body, "events");
    let mut expected = HashMap::new();
    expected.insert("page".to_string(), "1".to_string());
    expected.insert("size".to_string(), "200".to_string());
    expected.insert("sort".to_string(), "date,name,asc".to_string());
    assert_eq!(next, NextPage::with_params(expected));
}

#[test]
fn test_next_page_is_idempotent() {
    let body = page_body(
        200,
        1,
        Some("/discovery/v2/events.json?page=2&size=200"),
        vec![event("2022-06-01T00:00:00Z")],
    );

    assert_eq!(
        discovery_next_page(&body, "events"),
        discovery_next_page(&body, "events")
    );
}

#[test]
fn test_depth_boundary_routes_to_timestamp_fallback() {
    // size * (number + 1) == 1000 exactly: the offset branch must NOT be
    // taken even though a next link is present.
    let body = page_body(
        200,
        4,
        Some("/discovery/v2/events.json?page=5&size=200"),
        vec![event("2022-06-01T00:00:00Z"), event("2022-07-01T12:30:00Z")],
    );

    let next = discovery_next_page(&body, "events");
    assert_eq!(next, NextPage::with_param("startDateTime", "2022-07-01T12:30:00Z"));
}

#[test]
fn test_no_next_link_with_items_yields_timestamp_cursor() {
    let body = page_body(200, 2, None, vec![event("2023-01-01T00:00:00Z")]);

    let next = discovery_next_page(&body, "events");
    assert_eq!(next, NextPage::with_param("startDateTime", "2023-01-01T00:00:00Z"));
}

#[test]
fn test_no_next_link_and_no_items_ends_stream() {
    let body = json!({
        "page": { "size": 200, "number": 0, "totalElements": 0 },
        "_links": {}
    });

    assert_eq!(discovery_next_page(&body, "events"), NextPage::Done);
}

#[test]
fn test_items_without_start_time_end_stream() {
    let body = page_body(200, 4, None, vec![json!({"id": "evt", "name": "No dates"})]);

    assert_eq!(discovery_next_page(&body, "events"), NextPage::Done);
}

#[test]
fn test_missing_page_metadata_falls_back_to_timestamp() {
    // Without size/number the offset branch cannot be proven safe.
    let body = json!({
        "_links": { "next": { "href": "/x?page=1" } },
        "_embedded": { "events": [event("2022-03-01T00:00:00Z")] }
    });

    let next = discovery_next_page(&body, "events");
    assert_eq!(next, NextPage::with_param("startDateTime", "2022-03-01T00:00:00Z"));
}

#[test]
fn test_parse_link_query() {
    let cursor = parse_link_query("/discovery/v2/venues.json?page=3&size=100&locale=en-us");
    assert_eq!(cursor.get("page"), Some(&"3".to_string()));
    assert_eq!(cursor.get("size"), Some(&"100".to_string()));
    assert_eq!(cursor.get("locale"), Some(&"en-us".to_string()));

    assert!(parse_link_query("/discovery/v2/venues.json").is_empty());
}

#[test]
fn test_last_start_time() {
    let items = vec![event("2022-01-01T00:00:00Z"), event("2022-02-01T00:00:00Z")];
    assert_eq!(last_start_time(&items), Some("2022-02-01T00:00:00Z"));
    assert_eq!(last_start_time(&[]), None);
}

#[test]
fn test_next_page_helpers() {
    assert!(NextPage::Done.is_done());
    assert!(!NextPage::Done.is_continue());
    assert_eq!(NextPage::Done.into_cursor(), None);

    let next = NextPage::with_param("page", "1");
    assert!(next.is_continue());
    let cursor = next.into_cursor().unwrap();
    assert_eq!(cursor.get("page"), Some(&"1".to_string()));
}
