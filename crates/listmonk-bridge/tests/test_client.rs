//! HTTP behaviour of the Listmonk client against the mock server

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{
    list_json, page_json, subscriber_json, template_json, MockListmonk, MockResponse, API_TOKEN,
    USERNAME,
};
use listmonk_bridge::ListmonkClient;
use listmonk_core::params::{
    EmailLookupParams, GetSubscribersParams, ListMembershipParams, PageParams, ToolParams,
};
use listmonk_core::models::ListAction;
use listmonk_core::ErrorKind;
use serde_json::json;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_auth_header_on_every_call() {
    let mock = MockListmonk::start().await;
    mock.on("GET", "/api/health", MockResponse::data(json!(true)));
    mock.on("GET", "/api/lists", MockResponse::data(page_json(vec![], 0)));
    mock.on("DELETE", "/api/templates/4", MockResponse::data(json!(true)));

    let client = mock.client();
    assert!(client.health_check().await.unwrap());
    client.get_lists(&PageParams::default()).await.unwrap();
    assert!(client.delete_template(4).await.unwrap());

    let expected = format!("token {}:{}", USERNAME, API_TOKEN);
    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        assert_eq!(request.header("authorization"), Some(expected.as_str()));
        assert_eq!(request.header("accept"), Some("application/json"));
    }
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/subscribers/99",
        MockResponse::error(404, "Subscriber not found."),
    );

    let err = mock.client().get_subscriber(99).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().contains("Subscriber not found."));
}

#[tokio::test]
async fn test_status_taxonomy() {
    let mock = MockListmonk::start().await;
    mock.on("GET", "/api/lists/1", MockResponse::error(403, "Permission denied"));
    mock.on("GET", "/api/lists/2", MockResponse::error(400, "invalid list type"));
    mock.on("GET", "/api/lists/3", MockResponse::error(503, "maintenance"));
    mock.on("GET", "/api/lists/4", MockResponse::raw(500, ""));

    let client = mock.client();
    let kinds = [
        (1, ErrorKind::Authentication),
        (2, ErrorKind::RemoteValidation),
        (3, ErrorKind::Unavailable),
        (4, ErrorKind::Unavailable),
    ];
    for (id, kind) in kinds {
        let err = client.get_list(id).await.unwrap_err();
        assert_eq!(err.kind(), kind, "list {}", id);
    }

    let err = client.get_list(4).await.unwrap_err();
    assert!(err.to_string().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_malformed_body_is_unexpected_response() {
    let mock = MockListmonk::start().await;
    mock.on("GET", "/api/lists/1", MockResponse::raw(200, "<html>proxy</html>"));
    mock.on(
        "GET",
        "/api/subscribers/1",
        MockResponse::data(json!({"id": 1, "name": "no email"})),
    );

    let client = mock.client();
    let err = client.get_list(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedResponse);
    let err = client.get_subscriber(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedResponse);
    assert!(err.to_string().contains("email"));
}

#[tokio::test]
async fn test_timeout_is_unavailable_without_retry() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/campaigns/1",
        MockResponse::data(json!({})).delayed(Duration::from_secs(2)),
    );

    let client = ListmonkClient::new(&mock.config_with(Duration::from_millis(200), 0)).unwrap();
    let err = client.get_campaign(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert!(err.to_string().contains("timed out"));
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_get_retried_when_configured() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/templates",
        MockResponse::data(json!([])).delayed(Duration::from_secs(2)),
    );

    let client = ListmonkClient::new(&mock.config_with(Duration::from_millis(200), 1)).unwrap();
    let err = client.get_templates().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert_eq!(mock.requests().len(), 2);
}

#[tokio::test]
async fn test_mutation_never_retried() {
    let mock = MockListmonk::start().await;
    mock.on(
        "DELETE",
        "/api/lists/5",
        MockResponse::data(json!(true)).delayed(Duration::from_secs(2)),
    );

    let client = ListmonkClient::new(&mock.config_with(Duration::from_millis(200), 3)).unwrap();
    let err = client.delete_list(5).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let mock = MockListmonk::start().await;
    let mut config = mock.config();
    // Port 9 (discard) is not served locally
    config.url = "http://127.0.0.1:9".to_string();
    let client = ListmonkClient::new(&config).unwrap();

    let err = client.health_check().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
}

#[tokio::test]
async fn test_dropped_connection_not_retried() {
    // Accepts the request, then hangs up without answering
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
        }
    });

    let mock = MockListmonk::start().await;
    let mut config = mock.config_with(Duration::from_secs(2), 3);
    config.url = format!("http://{}", addr);
    let client = ListmonkClient::new(&config).unwrap();

    let err = client.get_campaign(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_lookup_by_email_with_apostrophe() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/subscribers",
        MockResponse::data(page_json(
            vec![subscriber_json(11, "o'brien@example.com", "Pat")],
            1,
        )),
    );

    let params = EmailLookupParams::parse(json!({"email": "o'brien@example.com"})).unwrap();
    let subscriber = mock.client().get_subscriber_by_email(&params).await.unwrap();
    assert_eq!(subscriber.email, "o'brien@example.com");
    assert_eq!(
        mock.requests()[0].query_param("query").as_deref(),
        Some("subscribers.email = 'o''brien@example.com'")
    );
}

#[tokio::test]
async fn test_listing_preserves_remote_order() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/subscribers",
        MockResponse::data(page_json(
            vec![
                subscriber_json(30, "zed@example.com", "Zed"),
                subscriber_json(2, "amy@example.com", "Amy"),
                subscriber_json(17, "kim@example.com", "Kim"),
            ],
            3,
        )),
    );

    let page = mock
        .client()
        .get_subscribers(&GetSubscribersParams::default())
        .await
        .unwrap();
    let ids: Vec<i64> = page.results.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![30, 2, 17]);
    assert_eq!(page.total, 3);

    let request = &mock.requests()[0];
    assert_eq!(request.query_param("order_by").as_deref(), Some("created_at"));
    assert_eq!(request.query_param("order").as_deref(), Some("desc"));
    assert_eq!(request.query_param("per_page").as_deref(), Some("20"));
}

#[tokio::test]
async fn test_lookup_by_email() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/subscribers",
        MockResponse::data(page_json(
            vec![subscriber_json(8, "ann@example.com", "Ann")],
            1,
        )),
    );

    let params = EmailLookupParams::parse(json!({"email": "ann@example.com"})).unwrap();
    let subscriber = mock.client().get_subscriber_by_email(&params).await.unwrap();
    assert_eq!(subscriber.id, 8);

    let request = &mock.requests()[0];
    assert_eq!(
        request.query_param("query").as_deref(),
        Some("subscribers.email = 'ann@example.com'")
    );
}

#[tokio::test]
async fn test_lookup_by_email_empty_is_not_found() {
    let mock = MockListmonk::start().await;
    mock.on("GET", "/api/subscribers", MockResponse::data(page_json(vec![], 0)));

    let params = EmailLookupParams::parse(json!({"email": "ghost@example.com"})).unwrap();
    let err = mock
        .client()
        .get_subscriber_by_email(&params)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_list_membership_body() {
    let mock = MockListmonk::start().await;
    mock.on("PUT", "/api/subscribers/lists", MockResponse::data(json!(true)));

    let params = ListMembershipParams::parse(json!({
        "subscriber_ids": [1, 2],
        "list_ids": [3],
        "status": "confirmed"
    }))
    .unwrap();
    let client = mock.client();
    assert!(client
        .manage_list_membership(&params, ListAction::Add)
        .await
        .unwrap());

    let request = &mock.requests()[0];
    assert_eq!(request.method, "PUT");
    assert_eq!(
        request.body.clone().unwrap(),
        json!({"ids": [1, 2], "action": "add", "target_list_ids": [3], "status": "confirmed"})
    );
}

#[tokio::test]
async fn test_all_lists_and_templates() {
    let mock = MockListmonk::start().await;
    mock.on(
        "GET",
        "/api/lists",
        MockResponse::data(page_json(vec![list_json(1, "Weekly"), list_json(2, "Monthly")], 2)),
    );
    mock.on(
        "GET",
        "/api/templates",
        MockResponse::data(json!([template_json(1, "Default"), template_json(2, "Plain")])),
    );

    let client = mock.client();
    let lists = client.get_all_lists().await.unwrap();
    assert_eq!(lists.results.len(), 2);
    assert_eq!(
        mock.requests()[0].query_param("per_page").as_deref(),
        Some("all")
    );

    let templates = client.get_templates().await.unwrap();
    assert_eq!(templates[0].name, "Default");
    assert!(templates[0].is_default);
}
