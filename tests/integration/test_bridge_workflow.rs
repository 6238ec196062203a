//! Integration tests for the bridge surface that need no live Listmonk

use std::collections::HashSet;
use std::time::Duration;

use listmonk_mcp::bridge::tools::catalog;
use listmonk_mcp::prelude::*;
use rmcp::model::ErrorCode;
use serde_json::json;

/// Bridge pointed at a port nothing listens on
fn offline_bridge() -> ListmonkBridge {
    let config = ListmonkConfig::builder()
        .url("http://127.0.0.1:9")
        .username("api")
        .api_token("token")
        .timeout(Duration::from_secs(2))
        .server_name("Test Newsletter")
        .build()
        .unwrap();
    ListmonkBridge::from_config(&config).unwrap()
}

#[test]
fn test_catalog_is_complete_and_unique() {
    let tools = catalog();
    assert_eq!(tools.len(), 29);

    let names: HashSet<_> = tools.iter().map(|t| t.name).collect();
    assert_eq!(names.len(), tools.len());
    for expected in [
        "check_listmonk_health",
        "get_subscribers",
        "add_subscriber",
        "remove_subscribers_from_lists",
        "create_campaign",
        "send_campaign",
        "schedule_campaign",
        "create_template",
        "send_transactional_email",
    ] {
        assert!(names.contains(expected), "missing {}", expected);
    }

    // Every schema is a JSON object schema
    for tool in &tools {
        assert_eq!(tool.to_json()["inputSchema"]["type"], "object", "{}", tool.name);
    }
}

#[test]
fn test_advertised_definitions() {
    let bridge = offline_bridge();
    assert_eq!(bridge.server_name(), "Test Newsletter");
    assert_eq!(bridge.tool_definitions().len(), catalog().len());

    let uris: Vec<String> = bridge
        .resource_definitions()
        .iter()
        .map(|r| r.raw.uri.clone())
        .collect();
    assert_eq!(
        uris,
        [
            "listmonk://subscribers",
            "listmonk://lists",
            "listmonk://campaigns",
            "listmonk://templates"
        ]
    );
}

#[tokio::test]
async fn test_unknown_tool_is_protocol_error() {
    let err = offline_bridge()
        .call("drop_database", json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn test_validation_precedes_network() {
    // Would fail as unavailable if it reached the network
    let result = offline_bridge()
        .call("add_subscriber", json!({"email": "bad", "name": "A", "lists": []}))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    let value = result.structured_content.unwrap();
    assert_eq!(value["error"]["kind"], "validation");
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    let result = offline_bridge()
        .call("get_mailing_lists", json!({}))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    let value = result.structured_content.unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error"]["kind"], "unavailable");
}

#[tokio::test]
async fn test_resource_uri_errors() {
    let bridge = offline_bridge();

    let err = bridge.read("listmonk://widgets").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);

    let err = bridge.read("listmonk://campaign/-1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

    let err = bridge.read("listmonk://lists").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
}

#[test]
fn test_resource_uri_round_trip_for_email() {
    let uri: ResourceUri = "listmonk://subscriber/email/ann%2Bnews%40example.com"
        .parse()
        .unwrap();
    assert_eq!(uri, ResourceUri::SubscriberByEmail("ann+news@example.com".to_string()));
    assert_eq!(
        uri.to_string(),
        "listmonk://subscriber/email/ann%2Bnews%40example.com"
    );
}
