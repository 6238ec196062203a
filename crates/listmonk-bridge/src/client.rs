//! Client for the Listmonk REST API
//!
//! Every operation is one outbound HTTP call carrying the token
//! `Authorization` header. Responses are unwrapped from Listmonk's
//! `{"data": ...}` envelope and decoded into the core models; non-2xx
//! statuses are mapped onto [`ListmonkError`].

use std::time::{Duration, Instant};

use listmonk_core::models::{
    Campaign, CampaignStatus, Envelope, ListAction, MailingList, Page, Subscriber, Template,
};
use listmonk_core::params::{
    AddSubscriberParams, CreateCampaignParams, CreateListParams, CreateTemplateParams,
    EmailLookupParams, GetCampaignsParams, GetSubscribersParams, ListMembershipParams,
    ListSubscribersParams, PageParams, ScheduleCampaignParams, SubscriberStatusParams,
    TransactionalEmailParams, UpdateCampaignParams, UpdateListParams, UpdateSubscriberParams,
    UpdateTemplateParams,
};
use listmonk_core::{ListmonkConfig, ListmonkError, Result};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::auth;

/// First backoff delay between GET retries, doubled per attempt
const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);

/// Longest remote error body quoted in an error message
const MAX_ERROR_BODY: usize = 200;

/// Async client for one Listmonk server.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ListmonkClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

#[derive(Deserialize)]
struct RemoteMessage {
    message: String,
}

impl ListmonkClient {
    /// Create a client from validated configuration
    pub fn new(config: &ListmonkConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(auth::default_headers(config)?)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
            max_retries: config.max_retries,
        })
    }

    /// Base URL of the Listmonk server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Send one request and return the response if its status is 2xx.
    ///
    /// Only GET requests are retried, and only when the request never got an
    /// HTTP response.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Response> {
        let url = self.endpoint(path);
        let retries = if method == Method::GET {
            self.max_retries
        } else {
            0
        };

        let mut attempt = 0;
        loop {
            let mut request = self.http.request(method.clone(), &url);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            debug!(method = %method, path, attempt, "Listmonk request");
            let started = Instant::now();
            match request.send().await {
                Ok(response) => {
                    debug!(
                        method = %method,
                        path,
                        status = response.status().as_u16(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Listmonk response"
                    );
                    return check_status(response).await;
                }
                Err(err) if attempt < retries && is_retryable(&err) => {
                    let delay = RETRY_BASE_DELAY.saturating_mul(2u32.saturating_pow(attempt));
                    warn!(
                        method = %method,
                        path,
                        attempt,
                        error = %err,
                        "Listmonk request failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(transport_error(&err)),
            }
        }
    }

    async fn data<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T> {
        let response = self.execute(method.clone(), path, query, body).await?;
        let bytes = response.bytes().await.map_err(|e| transport_error(&e))?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes).map_err(|e| {
            ListmonkError::unexpected(format!("{} {}: {}", method, path, e))
        })?;
        Ok(envelope.data)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.data(Method::GET, path, query, None).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        self.data(Method::POST, path, &[], Some(body)).await
    }

    async fn put<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        self.data(Method::PUT, path, &[], Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<bool> {
        self.data(Method::DELETE, path, &[], None).await
    }

    // Health

    /// `GET /api/health`
    pub async fn health_check(&self) -> Result<bool> {
        self.get("/health", &[]).await
    }

    // Subscribers

    pub async fn get_subscribers(
        &self,
        params: &GetSubscribersParams,
    ) -> Result<Page<Subscriber>> {
        self.get("/subscribers", &params.query_pairs()).await
    }

    pub async fn get_subscriber(&self, subscriber_id: i64) -> Result<Subscriber> {
        self.get(&format!("/subscribers/{}", subscriber_id), &[]).await
    }

    /// Exact-match lookup; an empty result is reported as not found.
    pub async fn get_subscriber_by_email(&self, params: &EmailLookupParams) -> Result<Subscriber> {
        let query = [
            ("query", params.query()),
            ("page", "1".to_string()),
            ("per_page", "1".to_string()),
        ];
        let page: Page<Subscriber> = self.get("/subscribers", &query).await?;
        page.results.into_iter().next().ok_or_else(|| {
            ListmonkError::not_found(format!("no subscriber with email {}", params.email))
        })
    }

    pub async fn create_subscriber(&self, params: &AddSubscriberParams) -> Result<Subscriber> {
        self.post("/subscribers", &params.payload()).await
    }

    pub async fn update_subscriber(&self, params: &UpdateSubscriberParams) -> Result<Subscriber> {
        self.put(
            &format!("/subscribers/{}", params.subscriber_id),
            &params.payload(),
        )
        .await
    }

    pub async fn delete_subscriber(&self, subscriber_id: i64) -> Result<bool> {
        self.delete(&format!("/subscribers/{}", subscriber_id)).await
    }

    pub async fn set_subscriber_status(
        &self,
        params: &SubscriberStatusParams,
    ) -> Result<Subscriber> {
        self.put(
            &format!("/subscribers/{}", params.subscriber_id),
            &json!({ "status": params.status }),
        )
        .await
    }

    /// `PUT /api/subscribers/lists` with the given action
    pub async fn manage_list_membership(
        &self,
        params: &ListMembershipParams,
        action: ListAction,
    ) -> Result<bool> {
        self.put("/subscribers/lists", &params.payload(action)).await
    }

    // Lists

    pub async fn get_lists(&self, params: &PageParams) -> Result<Page<MailingList>> {
        self.get("/lists", &params.query()).await
    }

    /// Every list in one page
    pub async fn get_all_lists(&self) -> Result<Page<MailingList>> {
        self.get("/lists", &[("per_page", "all".to_string())]).await
    }

    pub async fn get_list(&self, list_id: i64) -> Result<MailingList> {
        self.get(&format!("/lists/{}", list_id), &[]).await
    }

    pub async fn create_list(&self, params: &CreateListParams) -> Result<MailingList> {
        self.post("/lists", &params.payload()).await
    }

    pub async fn update_list(&self, params: &UpdateListParams) -> Result<MailingList> {
        self.put(&format!("/lists/{}", params.list_id), &params.payload())
            .await
    }

    pub async fn delete_list(&self, list_id: i64) -> Result<bool> {
        self.delete(&format!("/lists/{}", list_id)).await
    }

    pub async fn get_list_subscribers(
        &self,
        params: &ListSubscribersParams,
    ) -> Result<Page<Subscriber>> {
        self.get("/subscribers", &params.query()).await
    }

    // Campaigns

    pub async fn get_campaigns(&self, params: &GetCampaignsParams) -> Result<Page<Campaign>> {
        self.get("/campaigns", &params.query()).await
    }

    pub async fn get_campaign(&self, campaign_id: i64) -> Result<Campaign> {
        self.get(&format!("/campaigns/{}", campaign_id), &[]).await
    }

    pub async fn create_campaign(&self, params: &CreateCampaignParams) -> Result<Campaign> {
        self.post("/campaigns", &params.payload()).await
    }

    pub async fn update_campaign(&self, params: &UpdateCampaignParams) -> Result<Campaign> {
        self.put(
            &format!("/campaigns/{}", params.campaign_id),
            &params.payload(),
        )
        .await
    }

    /// Start sending right away
    pub async fn send_campaign(&self, campaign_id: i64) -> Result<Campaign> {
        self.put(
            &format!("/campaigns/{}/status", campaign_id),
            &json!({ "status": CampaignStatus::Running }),
        )
        .await
    }

    pub async fn schedule_campaign(&self, params: &ScheduleCampaignParams) -> Result<Campaign> {
        self.put(
            &format!("/campaigns/{}/status", params.campaign_id),
            &json!({ "status": CampaignStatus::Scheduled, "send_at": params.send_at }),
        )
        .await
    }

    /// Rendered campaign body. Listmonk answers with HTML, not JSON.
    pub async fn get_campaign_preview(&self, campaign_id: i64) -> Result<String> {
        let response = self
            .execute(
                Method::GET,
                &format!("/campaigns/{}/preview", campaign_id),
                &[],
                None,
            )
            .await?;
        response.text().await.map_err(|e| transport_error(&e))
    }

    // Templates

    pub async fn get_templates(&self) -> Result<Vec<Template>> {
        self.get("/templates", &[]).await
    }

    pub async fn get_template(&self, template_id: i64) -> Result<Template> {
        self.get(&format!("/templates/{}", template_id), &[]).await
    }

    pub async fn create_template(&self, params: &CreateTemplateParams) -> Result<Template> {
        self.post("/templates", &params.payload()).await
    }

    pub async fn update_template(&self, params: &UpdateTemplateParams) -> Result<Template> {
        self.put(
            &format!("/templates/{}", params.template_id),
            &params.payload(),
        )
        .await
    }

    pub async fn delete_template(&self, template_id: i64) -> Result<bool> {
        self.delete(&format!("/templates/{}", template_id)).await
    }

    // Transactional

    pub async fn send_transactional_email(
        &self,
        params: &TransactionalEmailParams,
    ) -> Result<bool> {
        self.post("/tx", &params.payload()).await
    }
}

/// Map a non-2xx response onto the error taxonomy.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ListmonkError::from_status(
        status.as_u16(),
        remote_message(&body, status.canonical_reason()),
    ))
}

/// Listmonk reports failures as `{"message": "..."}`.
fn remote_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(remote) = serde_json::from_str::<RemoteMessage>(body) {
        return remote.message;
    }
    let body = body.trim();
    if body.is_empty() {
        return reason.unwrap_or("no response body").to_string();
    }
    body.chars().take(MAX_ERROR_BODY).collect()
}

/// Only failures before Listmonk could act on the request are retried.
fn is_retryable(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

fn transport_error(err: &reqwest::Error) -> ListmonkError {
    if err.is_timeout() {
        ListmonkError::unavailable(format!("request timed out: {}", err))
    } else if err.is_connect() {
        ListmonkError::unavailable(format!("connection failed: {}", err))
    } else if err.is_decode() {
        ListmonkError::unexpected(format!("could not read response body: {}", err))
    } else {
        ListmonkError::unavailable(format!("request failed: {}", err))
    }
}
