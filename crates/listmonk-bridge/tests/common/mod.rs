//! In-process mock of the Listmonk REST API.
//!
//! Records every request and answers with scripted responses keyed by
//! method and path. Unscripted routes answer 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use listmonk_bridge::{ListmonkBridge, ListmonkClient};
use listmonk_core::ListmonkConfig;
use serde_json::{json, Value};

pub const USERNAME: &str = "api-user";
pub const API_TOKEN: &str = "secret-token";

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Decoded query parameters
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Scripted response
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    body: String,
    content_type: &'static str,
    delay: Duration,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
            delay: Duration::ZERO,
        }
    }

    /// 200 with Listmonk's `{"data": ...}` envelope
    pub fn data(data: Value) -> Self {
        Self::json(200, json!({ "data": data }))
    }

    /// Listmonk-style error body
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "message": message }))
    }

    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            content_type: "text/html; charset=utf-8",
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "text/plain",
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    routes: Mutex<HashMap<(String, String), MockResponse>>,
}

/// Running mock server bound to a random local port
pub struct MockListmonk {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockListmonk {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Script the response for `method path`
    pub fn on(&self, method: &str, path: &str, response: MockResponse) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn config_with(&self, timeout: Duration, max_retries: u32) -> ListmonkConfig {
        ListmonkConfig::builder()
            .url(self.url())
            .username(USERNAME)
            .api_token(API_TOKEN)
            .timeout(timeout)
            .max_retries(max_retries)
            .build()
            .unwrap()
    }

    pub fn config(&self) -> ListmonkConfig {
        self.config_with(Duration::from_secs(5), 0)
    }

    pub fn client(&self) -> ListmonkClient {
        ListmonkClient::new(&self.config()).unwrap()
    }

    pub fn bridge(&self) -> ListmonkBridge {
        ListmonkBridge::from_config(&self.config()).unwrap()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
        body: serde_json::from_slice(&body).ok(),
    };
    state.requests.lock().unwrap().push(recorded);

    let scripted = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();

    let response = scripted.unwrap_or_else(|| MockResponse::error(404, "route not scripted"));
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    let status = StatusCode::from_u16(response.status).unwrap();
    (
        status,
        [(header::CONTENT_TYPE, response.content_type)],
        response.body,
    )
        .into_response()
}

// Fixtures

pub fn subscriber_json(id: i64, email: &str, name: &str) -> Value {
    json!({
        "id": id,
        "uuid": format!("00000000-0000-0000-0000-{:012}", id),
        "email": email,
        "name": name,
        "status": "enabled",
        "attribs": {},
        "lists": [{"id": 1, "uuid": "list-1", "name": "Weekly", "subscription_status": "confirmed"}],
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn list_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "uuid": format!("list-{}", id),
        "name": name,
        "type": "public",
        "optin": "single",
        "tags": ["news"],
        "subscriber_count": 12,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn campaign_json(id: i64, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "uuid": format!("campaign-{}", id),
        "name": name,
        "subject": format!("{} subject", name),
        "from_email": "News <news@example.com>",
        "status": status,
        "type": "regular",
        "content_type": "richtext",
        "tags": [],
        "template_id": 1,
        "lists": [{"id": 1, "name": "Weekly"}],
        "views": 0,
        "clicks": 0,
        "to_send": 0,
        "sent": 0,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn template_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "body": "<html>{{ template \"content\" . }}</html>",
        "type": "campaign",
        "is_default": id == 1,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn page_json(results: Vec<Value>, total: i64) -> Value {
    json!({
        "results": results,
        "query": "",
        "total": total,
        "per_page": 20,
        "page": 1
    })
}
