//! End-to-end tests against a mock Pimberly API using only the public API

use pimberly_harvest::{
    ApiClient, ApiClientConfig, Cursor, EndpointBuilder, Environment, HarvestConfig, Harvester,
    ResourceKind, RetryPolicy,
};
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn harvester_for(server: &MockServer) -> Harvester {
    let base = Url::parse(&format!("{}/api/v2.2/products", server.uri())).unwrap();
    let client = ApiClient::with_config(
        ApiClientConfig::builder()
            .token("integration-token")
            .timeout(Duration::from_secs(5))
            .build(),
    );
    Harvester::new(client)
        .with_endpoints(EndpointBuilder::with_base_urls(base.clone(), base))
        .with_config(
            HarvestConfig::new()
                .with_retry(RetryPolicy::bounded(4, Duration::from_millis(1)))
                .with_page_logging(true),
        )
}

#[tokio::test]
async fn full_catalog_harvest_flattens_nested_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2.2/products"))
        .and(header("Authorization", "integration-token"))
        .and(query_param_is_missing("sinceId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "primaryId": 894_096_938,
                    "name": "Widget",
                    "details": {"color": "red", "sizes": ["S", "M"]}
                }
            ],
            "maxId": "page-1-max"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2.2/products"))
        .and(query_param("sinceId", "page-1-max"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut harvester = harvester_for(&mock_server);
    let table = harvester
        .products(Environment::Production, ResourceKind::Product, None, None)
        .await
        .unwrap();

    // name, details.color, details.sizes.0, details.sizes.1
    assert_eq!(table.len(), 4);
    for row in table.rows() {
        assert_eq!(row.primary_id, "894096938");
        assert!(row.item_id.is_none());
    }

    let attributes: Vec<&str> = table.rows().iter().map(|r| r.attribute.as_str()).collect();
    assert!(attributes.contains(&"details.color"));
    assert!(attributes.contains(&"details.sizes.1"));
}

#[tokio::test]
async fn date_filtered_harvest_sends_filter_clause() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2.2/products"))
        .and(query_param(
            "filters",
            "{\"dateUpdated\":{\"$gte\":\"2024-01-15T00:00:0.000Z\"}}",
        ))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut harvester = harvester_for(&mock_server);
    let table = harvester
        .products(
            Environment::Production,
            ResourceKind::Product,
            Some("2024-01-15"),
            None,
        )
        .await
        .unwrap();

    assert!(table.is_empty());
}

#[tokio::test]
async fn resume_from_cursor_then_survive_outage() {
    let mock_server = MockServer::start().await;

    // One 503 before the resumed page succeeds
    Mock::given(method("GET"))
        .and(path("/api/v2.2/products"))
        .and(query_param("sinceId", "resume-here"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2.2/products"))
        .and(query_param("sinceId", "resume-here"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"primaryId": "R1", "name": "Resumed"}],
            "maxId": "final"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2.2/products"))
        .and(query_param("sinceId", "final"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut harvester = harvester_for(&mock_server);
    let table = harvester
        .products(
            Environment::Production,
            ResourceKind::Channel,
            None,
            Some(Cursor::new("resume-here")),
        )
        .await
        .unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].primary_id, "R1");
    assert_eq!(harvester.stats().retries, 1);
}

#[tokio::test]
async fn parent_resolution_round_trips_mixed_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2.2/products/894096938XLG/parents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"primaryId": "894096938", "itemStatus": "active"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2.2/products/813037900076/parents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"primaryId": "813037900", "itemStatus": "active"}]
        })))
        .mount(&mock_server)
        .await;

    let mut harvester = harvester_for(&mock_server);
    let child_ids = vec![json!("894096938XLG"), json!(813_037_900_076_u64)];
    let table = harvester
        .parents(Environment::Production, &child_ids, true)
        .await
        .unwrap();

    assert_eq!(table.len(), 2);
    let item_ids: Vec<&str> = table
        .rows()
        .iter()
        .map(|r| r.item_id.as_deref().unwrap())
        .collect();
    assert_eq!(item_ids, vec!["894096938XLG", "813037900076"]);
}
