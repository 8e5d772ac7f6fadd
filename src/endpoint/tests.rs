//! Tests for endpoint URL construction

use super::*;
use crate::types::{Environment, ResourceKind};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn builder() -> EndpointBuilder {
    EndpointBuilder::new()
}

#[test_case(Environment::Production, "https://pimber.ly/api/v2.2/products?extendResponse=1&attributes=*"; "production")]
#[test_case(Environment::Sandbox, "https://sandbox.pimber.ly/api/v2.2/products?extendResponse=1&attributes=*"; "sandbox")]
fn test_product_first_page(env: Environment, expected: &str) {
    let url = builder()
        .products(1, None, ResourceKind::Product, env, None)
        .unwrap();
    assert_eq!(url.as_str(), expected);
}

#[test]
fn test_product_first_page_ends_with_extend_suffix() {
    let url = builder()
        .products(1, None, ResourceKind::Product, Environment::Production, None)
        .unwrap();
    assert!(url.as_str().ends_with("?extendResponse=1&attributes=*"));
}

#[test]
fn test_product_later_page_embeds_cursor_before_suffix() {
    let cursor = Cursor::new("60f7a1b2c3d4e5f6a7b8c9d0");
    let url = builder()
        .products(
            2,
            Some(&cursor),
            ResourceKind::Product,
            Environment::Production,
            None,
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://pimber.ly/api/v2.2/products?sinceId=60f7a1b2c3d4e5f6a7b8c9d0&extendResponse=1&attributes=*"
    );
}

#[test_case(Environment::Production, "https://pimber.ly/api/v2.2/products"; "production")]
#[test_case(Environment::Sandbox, "https://sandbox.pimber.ly/api/v2.2/products"; "sandbox")]
fn test_channel_first_page_is_bare_base(env: Environment, expected: &str) {
    let url = builder()
        .products(1, None, ResourceKind::Channel, env, None)
        .unwrap();
    assert_eq!(url.as_str(), expected);
}

#[test]
fn test_channel_embeds_cursor_when_present() {
    // A start cursor from a previous run applies even on page 1
    let cursor = Cursor::new("987654321");
    let url = builder()
        .products(
            1,
            Some(&cursor),
            ResourceKind::Channel,
            Environment::Production,
            None,
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://pimber.ly/api/v2.2/products?sinceId=987654321"
    );
}

#[test]
fn test_date_filter_targets_production_regardless_of_env() {
    let url = builder()
        .products(
            1,
            None,
            ResourceKind::Product,
            Environment::Sandbox,
            Some("2021-08-12"),
        )
        .unwrap();
    assert_eq!(url.host_str(), Some("pimber.ly"));
    assert!(url.as_str().contains("dateUpdated"));
    assert!(url.as_str().contains("2021-08-12"));
}

#[test]
fn test_date_filter_clause_shape() {
    let url = builder()
        .products(
            1,
            None,
            ResourceKind::Product,
            Environment::Production,
            Some("2021-08-12"),
        )
        .unwrap();
    let (key, value) = url.query_pairs().next().unwrap();
    assert_eq!(key, "filters");
    assert_eq!(value, "{\"dateUpdated\":{\"$gte\":\"2021-08-12T00:00:0.000Z\"}}");
}

#[test]
fn test_date_filter_later_page_includes_cursor() {
    let cursor = Cursor::new("123456789");
    let url = builder()
        .products(
            2,
            Some(&cursor),
            ResourceKind::Product,
            Environment::Production,
            Some("2021-08-12"),
        )
        .unwrap();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs[0], ("sinceId".to_string(), "123456789".to_string()));
    assert_eq!(pairs[1].0, "filters");
    assert!(pairs[1].1.contains("2021-08-12"));
}

#[test]
fn test_empty_date_does_not_trigger_filter() {
    let url = builder()
        .products(1, None, ResourceKind::Product, Environment::Sandbox, Some(""))
        .unwrap();
    assert_eq!(url.host_str(), Some("sandbox.pimber.ly"));
    assert!(!url.as_str().contains("filters"));
}

#[test]
fn test_builder_is_idempotent() {
    let b = builder();
    let cursor = Cursor::new("abc");
    let first = b
        .products(
            3,
            Some(&cursor),
            ResourceKind::Product,
            Environment::Production,
            None,
        )
        .unwrap();
    let second = b
        .products(
            3,
            Some(&cursor),
            ResourceKind::Product,
            Environment::Production,
            None,
        )
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_later_page_without_cursor_is_rejected() {
    let result = builder().products(2, None, ResourceKind::Product, Environment::Production, None);
    assert!(matches!(
        result,
        Err(crate::error::Error::UnsupportedEndpoint { .. })
    ));
}

#[test]
fn test_page_zero_is_rejected() {
    let result = builder().products(0, None, ResourceKind::Channel, Environment::Production, None);
    assert!(result.is_err());
}

#[test]
fn test_parents_url_id_only() {
    let url = builder()
        .parents("894096938XLG", Environment::Production, true)
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://pimber.ly/api/v2.2/products/894096938XLG/parents"
    );
}

#[test]
fn test_parents_url_full_records() {
    let url = builder()
        .parents("813037900076", Environment::Sandbox, false)
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://sandbox.pimber.ly/api/v2.2/products/813037900076/parents?extendResponse=1&attributes=*"
    );
}

#[test]
fn test_parents_url_preserves_encoded_segment() {
    let encoded = encode_id("AB/12 3");
    let url = builder()
        .parents(&encoded, Environment::Production, true)
        .unwrap();
    assert!(url.path().contains("AB%2F12%203"));
}

#[test_case("894096938XLG"; "alphanumeric")]
#[test_case("813037900076"; "numeric string")]
#[test_case("AB/12+3 4#x"; "punctuation and spaces")]
#[test_case("größe-Ø"; "non-ascii")]
fn test_encode_decode_round_trip(id: &str) {
    assert_eq!(decode_id(&encode_id(id)), id);
}

#[test]
fn test_cursor_from_value() {
    assert_eq!(
        Cursor::from_value(&serde_json::json!("abc123")),
        Some(Cursor::new("abc123"))
    );
    assert_eq!(
        Cursor::from_value(&serde_json::json!(813_037_900_076_u64)),
        Some(Cursor::new("813037900076"))
    );
    assert_eq!(Cursor::from_value(&serde_json::Value::Null), None);
}
