//! Unit tests for tool input parsing and schemas

use listmonk_mcp::core::params::{
    AddSubscriberParams, CreateCampaignParams, GetSubscribersParams, NoParams, PageParams,
    ScheduleCampaignParams, UpdateSubscriberParams,
};
use listmonk_mcp::core::{ErrorKind, ToolParams};
use serde_json::{json, Value};

#[test]
fn test_add_subscriber_defaults() {
    let params = AddSubscriberParams::parse(json!({
        "email": "  ada@example.com ",
        "name": "Ada",
        "lists": [1, 2]
    }))
    .unwrap();

    assert_eq!(params.email, "ada@example.com");
    let payload = params.payload();
    assert_eq!(payload["status"], "enabled");
    assert_eq!(payload["attribs"], json!({}));
    assert_eq!(payload["preconfirm_subscriptions"], false);
}

#[test]
fn test_add_subscriber_rejections() {
    let cases = [
        json!({"email": "not-an-email", "name": "Ada", "lists": []}),
        json!({"email": "ada@example.com", "name": "   ", "lists": []}),
        json!({"email": "ada@example.com", "name": "Ada", "lists": [0]}),
        json!({"email": "ada@example.com", "name": "Ada", "lists": [], "status": "active"}),
        json!({"name": "Ada", "lists": []}),
    ];
    for args in cases {
        let err = AddSubscriberParams::parse(args.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{}", args);
    }
}

#[test]
fn test_update_requires_a_change() {
    let err = UpdateSubscriberParams::parse(json!({"subscriber_id": 3})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("at least one field"));

    let params = UpdateSubscriberParams::parse(json!({"subscriber_id": 3, "name": "Ada"})).unwrap();
    assert_eq!(params.payload(), json!({"name": "Ada"}));
}

#[test]
fn test_campaign_needs_body_or_template() {
    let err = CreateCampaignParams::parse(json!({
        "name": "Launch",
        "subject": "Hello",
        "lists": [1],
        "body": "   "
    }))
    .unwrap_err();
    assert!(err.to_string().contains("body or template_id"));

    let params = CreateCampaignParams::parse(json!({
        "name": "Launch",
        "subject": "Hello",
        "lists": [1],
        "body": "<p>hi</p>",
        "tags": [" launch ", ""]
    }))
    .unwrap();
    let payload = params.payload();
    assert_eq!(payload["type"], "regular");
    assert_eq!(payload["content_type"], "richtext");
    assert_eq!(payload["tags"], json!(["launch"]));
    assert!(payload.get("template_id").is_none());
}

#[test]
fn test_schedule_requires_timestamp() {
    assert!(ScheduleCampaignParams::parse(json!({"campaign_id": 1})).is_err());
    assert!(ScheduleCampaignParams::parse(json!({
        "campaign_id": 1,
        "send_at": "next tuesday"
    }))
    .is_err());
    assert!(ScheduleCampaignParams::parse(json!({
        "campaign_id": 1,
        "send_at": "2030-06-01T08:30:00+02:00"
    }))
    .is_ok());
}

#[test]
fn test_pagination_bounds() {
    assert!(PageParams::parse(json!({"page": 0})).is_err());
    assert!(PageParams::parse(json!({"per_page": 1001})).is_err());
    let params = PageParams::parse(Value::Null).unwrap();
    assert_eq!((params.page, params.per_page), (1, 20));

    let params = GetSubscribersParams::parse(json!({})).unwrap();
    let query = params.query_pairs();
    assert!(query.contains(&("order_by", "created_at".to_string())));
    assert!(query.contains(&("order", "desc".to_string())));
}

#[test]
fn test_schema_required_fields() {
    let schema = AddSubscriberParams::schema();
    assert_eq!(schema.required(), ["email", "name", "lists"]);

    let object = schema.to_json_object();
    assert_eq!(object["type"], "object");
    assert_eq!(object["properties"]["email"]["format"], "email");

    assert!(NoParams::schema().required().is_empty());
}
