//! Resource reads through the MCP bridge

mod common;

use common::{campaign_json, page_json, subscriber_json, template_json, MockListmonk, MockResponse};
use rmcp::model::{ErrorCode, ResourceContents};
use serde_json::json;

fn text_of(contents: &ResourceContents) -> &str {
    match contents {
        ResourceContents::TextResourceContents { text, .. } => text.as_str(),
        other => panic!("expected text contents, got {:?}", other),
    }
}

#[tokio::test]
async fn test_read_subscriber() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/subscribers/3",
        MockResponse::data(subscriber_json(3, "ann@example.com", "Ann")),
    );

    let result = mock.bridge().read("listmonk://subscriber/3").await.unwrap();
    assert_eq!(result.contents.len(), 1);
    let text = text_of(&result.contents[0]);
    assert!(text.starts_with("# Subscriber: Ann"));
    assert!(text.contains("ann@example.com"));
}

#[tokio::test]
async fn test_read_subscriber_by_email() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/subscribers",
        MockResponse::data(page_json(vec![subscriber_json(5, "bo@example.com", "Bo")], 1)),
    );

    let result = mock
        .bridge()
        .read("listmonk://subscriber/email/bo%40example.com")
        .await
        .unwrap();
    assert!(text_of(&result.contents[0]).contains("- **ID**: 5"));
    assert_eq!(
        mock.requests()[0].query_param("query").as_deref(),
        Some("subscribers.email = 'bo@example.com'")
    );
}

#[tokio::test]
async fn test_read_campaign_with_deleted_list() {
    let mock = MockListmonk::start().await;
    let mut campaign = campaign_json(3, "Old newsletter", "finished");
    campaign["lists"] = json!([{"id": null, "name": "Old list"}, {"id": 1, "name": "Weekly"}]);
    campaign["tags"] = serde_json::Value::Null;
    mock.on("GET", "/api/campaigns/3", MockResponse::data(campaign));

    let result = mock.bridge().read("listmonk://campaign/3").await.unwrap();
    let text = text_of(&result.contents[0]);
    assert!(text.starts_with("# Campaign: Old newsletter"));
    assert!(text.contains("Old list (deleted), Weekly (ID 1)"));
}

#[tokio::test]
async fn test_read_collections() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/campaigns",
        MockResponse::data(page_json(
            vec![
                campaign_json(9, "Newest", "draft"),
                campaign_json(2, "Oldest", "finished"),
            ],
            2,
        )),
    );
    mock.on(
        "GET",
        "/api/templates",
        MockResponse::data(json!([template_json(1, "Default")])),
    );
    let bridge = mock.bridge();

    let campaigns = bridge.read("listmonk://campaigns").await.unwrap();
    let text = text_of(&campaigns.contents[0]);
    assert!(text.find("Newest").unwrap() < text.find("Oldest").unwrap());
    assert_eq!(
        mock.requests()[0].query_param("per_page").as_deref(),
        Some("50")
    );

    let templates = bridge.read("listmonk://templates").await.unwrap();
    assert!(text_of(&templates.contents[0]).contains("Default"));
}

#[tokio::test]
async fn test_read_errors() {
    let mock = MockListmonk::start().await;
    mock.on("GET", "/api/lists/8", MockResponse::error(404, "list not found"));
    mock.on("GET", "/api/templates/2", MockResponse::error(500, "boom"));
    let bridge = mock.bridge();

    let err = bridge.read("listmonk://list/8").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);

    let err = bridge.read("listmonk://list/eight").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

    let err = bridge.read("listmonk://template/2").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);

    // Only the two well-formed URIs reached the server
    assert_eq!(mock.requests().len(), 2);
}
