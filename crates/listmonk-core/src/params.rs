//! Tool input structures.
//!
//! Each structure is deserialized from the MCP `arguments` object, checked by
//! [`ToolParams::validate`], and only then turned into a request. Anything that
//! fails here never reaches the network.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ListmonkError, Result};
use crate::models::{
    CampaignStatus, CampaignType, ContentType, ListAction, ListType, OptinType, SortOrder,
    SubscriberOrderBy, SubscriberStatus, SubscriptionStatus, TemplateType, TxContentType,
};
use crate::schema::ToolSchema;
use crate::validation::{self, DESCRIPTION_MAX_LEN, NAME_MAX_LEN, PER_PAGE_MAX, SUBJECT_MAX_LEN};

/// Input of one tool: parse, validate, describe.
pub trait ToolParams: DeserializeOwned + Sized {
    /// JSON schema advertised in `tools/list`
    fn schema() -> ToolSchema;

    /// Check and normalize the parsed input
    fn validate(self) -> Result<Self>;

    /// Parse tool arguments and validate them.
    fn parse(args: Value) -> Result<Self> {
        let args = match args {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        let parsed: Self = serde_json::from_value(args)
            .map_err(|e| ListmonkError::validation(e.to_string()))?;
        parsed.validate()
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

fn page_schema() -> ToolSchema {
    ToolSchema::integer_range(Some(1), None)
        .with_default(1)
        .describe("Page number, starting at 1")
}

fn per_page_schema() -> ToolSchema {
    ToolSchema::integer_range(Some(1), Some(i64::from(PER_PAGE_MAX)))
        .with_default(20)
        .describe("Results per page")
}

fn name_schema(what: &str) -> ToolSchema {
    ToolSchema::string_with_length(Some(1), Some(NAME_MAX_LEN)).describe(what)
}

fn ids_schema(what: &str) -> ToolSchema {
    ToolSchema::array(ToolSchema::id()).describe(what)
}

fn tags_schema() -> ToolSchema {
    ToolSchema::array(ToolSchema::string()).describe("Tags")
}

fn insert_some(map: &mut Map<String, Value>, key: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

fn require_changes(map: &Map<String, Value>, what: &str) -> Result<()> {
    if map.is_empty() {
        return Err(ListmonkError::validation(format!(
            "at least one field to update must be provided for {what}"
        )));
    }
    Ok(())
}

/// Tools without input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoParams {}

impl ToolParams for NoParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(Vec::<(&str, ToolSchema)>::new(), &[])
    }

    fn validate(self) -> Result<Self> {
        Ok(self)
    }
}

/// Plain pagination
#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageParams {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

impl ToolParams for PageParams {
    fn schema() -> ToolSchema {
        ToolSchema::object([("page", page_schema()), ("per_page", per_page_schema())], &[])
    }

    fn validate(self) -> Result<Self> {
        validation::page(self.page, self.per_page)?;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Subscribers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GetSubscribersParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "GetSubscribersParams::default_order_by")]
    pub order_by: SubscriberOrderBy,
    #[serde(default = "GetSubscribersParams::default_order")]
    pub order: SortOrder,
    /// Listmonk SQL expression, e.g. `subscribers.attribs->>'city' = 'Berlin'`
    #[serde(default)]
    pub query: Option<String>,
}

impl GetSubscribersParams {
    fn default_order_by() -> SubscriberOrderBy {
        SubscriberOrderBy::CreatedAt
    }

    fn default_order() -> SortOrder {
        SortOrder::Desc
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("order_by", self.order_by.to_string()),
            ("order", self.order.to_string()),
        ];
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        pairs
    }
}

impl Default for GetSubscribersParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            order_by: Self::default_order_by(),
            order: Self::default_order(),
            query: None,
        }
    }
}

impl ToolParams for GetSubscribersParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("page", page_schema()),
                ("per_page", per_page_schema()),
                (
                    "order_by",
                    ToolSchema::string_enum(SubscriberOrderBy::VALUES).with_default("created_at"),
                ),
                (
                    "order",
                    ToolSchema::string_enum(SortOrder::VALUES).with_default("desc"),
                ),
                (
                    "query",
                    ToolSchema::string()
                        .describe("Listmonk SQL filter, e.g. subscribers.name LIKE '%ann%'"),
                ),
            ],
            &[],
        )
    }

    fn validate(mut self) -> Result<Self> {
        validation::page(self.page, self.per_page)?;
        self.query = self
            .query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriberIdParams {
    pub subscriber_id: i64,
}

impl ToolParams for SubscriberIdParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [("subscriber_id", ToolSchema::id().describe("Subscriber ID"))],
            &["subscriber_id"],
        )
    }

    fn validate(self) -> Result<Self> {
        validation::positive_id("subscriber_id", self.subscriber_id)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailLookupParams {
    pub email: String,
}

impl EmailLookupParams {
    /// Subscriber query matching this address exactly. Single quotes are
    /// doubled so the address stays one SQL string literal.
    pub fn query(&self) -> String {
        format!("subscribers.email = '{}'", self.email.replace('\'', "''"))
    }
}

impl ToolParams for EmailLookupParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [(
                "email",
                ToolSchema::string_format("email").describe("Subscriber email address"),
            )],
            &["email"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        self.email = validation::email("email", &self.email)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddSubscriberParams {
    pub email: String,
    pub name: String,
    pub lists: Vec<i64>,
    #[serde(default = "AddSubscriberParams::default_status")]
    pub status: SubscriberStatus,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default)]
    pub preconfirm: bool,
}

impl AddSubscriberParams {
    fn default_status() -> SubscriberStatus {
        SubscriberStatus::Enabled
    }

    pub fn payload(&self) -> Value {
        serde_json::json!({
            "email": self.email,
            "name": self.name,
            "status": self.status,
            "lists": self.lists,
            "attribs": self.attributes.clone().unwrap_or_default(),
            "preconfirm_subscriptions": self.preconfirm,
        })
    }
}

impl ToolParams for AddSubscriberParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                (
                    "email",
                    ToolSchema::string_format("email").describe("Subscriber email address"),
                ),
                ("name", name_schema("Subscriber name")),
                ("lists", ids_schema("Mailing list IDs to subscribe to")),
                (
                    "status",
                    ToolSchema::string_enum(SubscriberStatus::VALUES).with_default("enabled"),
                ),
                (
                    "attributes",
                    ToolSchema::any_object().describe("Custom subscriber attributes"),
                ),
                (
                    "preconfirm",
                    ToolSchema::boolean()
                        .with_default(false)
                        .describe("Skip confirmation for double opt-in lists"),
                ),
            ],
            &["email", "name", "lists"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        self.email = validation::email("email", &self.email)?;
        self.name = validation::text("name", &self.name, 1, Some(NAME_MAX_LEN))?;
        validation::positive_ids("lists", &self.lists)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubscriberParams {
    pub subscriber_id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<SubscriberStatus>,
    #[serde(default)]
    pub lists: Option<Vec<i64>>,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
}

impl UpdateSubscriberParams {
    /// Only the supplied fields
    pub fn payload(&self) -> Value {
        let mut map = Map::new();
        insert_some(&mut map, "email", self.email.clone());
        insert_some(&mut map, "name", self.name.clone());
        insert_some(&mut map, "status", self.status.map(|s| s.as_str()));
        insert_some(&mut map, "lists", self.lists.clone());
        insert_some(&mut map, "attribs", self.attributes.clone());
        Value::Object(map)
    }
}

impl ToolParams for UpdateSubscriberParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("subscriber_id", ToolSchema::id().describe("Subscriber ID")),
                (
                    "email",
                    ToolSchema::string_format("email").describe("New email address"),
                ),
                ("name", name_schema("New name")),
                ("status", ToolSchema::string_enum(SubscriberStatus::VALUES)),
                ("lists", ids_schema("New list of mailing list IDs")),
                (
                    "attributes",
                    ToolSchema::any_object().describe("New custom attributes"),
                ),
            ],
            &["subscriber_id"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        validation::positive_id("subscriber_id", self.subscriber_id)?;
        if let Some(email) = &self.email {
            self.email = Some(validation::email("email", email)?);
        }
        if let Some(name) = &self.name {
            self.name = Some(validation::text("name", name, 1, Some(NAME_MAX_LEN))?);
        }
        if let Some(lists) = &self.lists {
            validation::positive_ids("lists", lists)?;
        }
        if let Value::Object(map) = self.payload() {
            require_changes(&map, "update_subscriber")?;
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriberStatusParams {
    pub subscriber_id: i64,
    pub status: SubscriberStatus,
}

impl ToolParams for SubscriberStatusParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("subscriber_id", ToolSchema::id().describe("Subscriber ID")),
                (
                    "status",
                    ToolSchema::string_enum(SubscriberStatus::VALUES).describe("New status"),
                ),
            ],
            &["subscriber_id", "status"],
        )
    }

    fn validate(self) -> Result<Self> {
        validation::positive_id("subscriber_id", self.subscriber_id)?;
        Ok(self)
    }
}

/// Bulk list membership change
#[derive(Debug, Clone, Deserialize)]
pub struct ListMembershipParams {
    pub subscriber_ids: Vec<i64>,
    pub list_ids: Vec<i64>,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>,
}

impl ListMembershipParams {
    pub fn payload(&self, action: ListAction) -> Value {
        let mut body = serde_json::json!({
            "ids": self.subscriber_ids,
            "action": action,
            "target_list_ids": self.list_ids,
        });
        if action == ListAction::Add {
            body["status"] = Value::from(
                self.status
                    .unwrap_or(SubscriptionStatus::Unconfirmed)
                    .as_str(),
            );
        }
        body
    }
}

impl ToolParams for ListMembershipParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                (
                    "subscriber_ids",
                    ids_schema("Subscriber IDs").min_items(1),
                ),
                ("list_ids", ids_schema("Mailing list IDs").min_items(1)),
                (
                    "status",
                    ToolSchema::string_enum(SubscriptionStatus::VALUES)
                        .with_default("unconfirmed")
                        .describe("Subscription status when adding"),
                ),
            ],
            &["subscriber_ids", "list_ids"],
        )
    }

    fn validate(self) -> Result<Self> {
        validation::non_empty_ids("subscriber_ids", &self.subscriber_ids)?;
        validation::non_empty_ids("list_ids", &self.list_ids)?;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ListIdParams {
    pub list_id: i64,
}

impl ToolParams for ListIdParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [("list_id", ToolSchema::id().describe("Mailing list ID"))],
            &["list_id"],
        )
    }

    fn validate(self) -> Result<Self> {
        validation::positive_id("list_id", self.list_id)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListSubscribersParams {
    pub list_id: i64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl ListSubscribersParams {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("list_id", self.list_id.to_string()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

impl ToolParams for ListSubscribersParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("list_id", ToolSchema::id().describe("Mailing list ID")),
                ("page", page_schema()),
                ("per_page", per_page_schema()),
            ],
            &["list_id"],
        )
    }

    fn validate(self) -> Result<Self> {
        validation::positive_id("list_id", self.list_id)?;
        validation::page(self.page, self.per_page)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateListParams {
    pub name: String,
    #[serde(rename = "type", default = "CreateListParams::default_type")]
    pub list_type: ListType,
    #[serde(default = "CreateListParams::default_optin")]
    pub optin: OptinType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateListParams {
    fn default_type() -> ListType {
        ListType::Public
    }

    fn default_optin() -> OptinType {
        OptinType::Single
    }

    pub fn payload(&self) -> Value {
        let mut body = serde_json::json!({
            "name": self.name,
            "type": self.list_type,
            "optin": self.optin,
            "tags": self.tags,
        });
        if let Some(description) = &self.description {
            body["description"] = Value::from(description.clone());
        }
        body
    }
}

impl ToolParams for CreateListParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("name", name_schema("List name")),
                (
                    "type",
                    ToolSchema::string_enum(ListType::VALUES).with_default("public"),
                ),
                (
                    "optin",
                    ToolSchema::string_enum(OptinType::VALUES).with_default("single"),
                ),
                ("tags", tags_schema()),
                (
                    "description",
                    ToolSchema::string_with_length(None, Some(DESCRIPTION_MAX_LEN)),
                ),
            ],
            &["name"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        self.name = validation::text("name", &self.name, 1, Some(NAME_MAX_LEN))?;
        self.tags = validation::tags(self.tags);
        self.description = match self.description {
            Some(d) => Some(validation::text("description", &d, 0, Some(DESCRIPTION_MAX_LEN))?)
                .filter(|d| !d.is_empty()),
            None => None,
        };
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateListParams {
    pub list_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub list_type: Option<ListType>,
    #[serde(default)]
    pub optin: Option<OptinType>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateListParams {
    pub fn payload(&self) -> Value {
        let mut map = Map::new();
        insert_some(&mut map, "name", self.name.clone());
        insert_some(&mut map, "type", self.list_type.map(|t| t.as_str()));
        insert_some(&mut map, "optin", self.optin.map(|o| o.as_str()));
        insert_some(&mut map, "tags", self.tags.clone());
        insert_some(&mut map, "description", self.description.clone());
        Value::Object(map)
    }
}

impl ToolParams for UpdateListParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("list_id", ToolSchema::id().describe("Mailing list ID")),
                ("name", name_schema("New list name")),
                ("type", ToolSchema::string_enum(ListType::VALUES)),
                ("optin", ToolSchema::string_enum(OptinType::VALUES)),
                ("tags", tags_schema()),
                (
                    "description",
                    ToolSchema::string_with_length(None, Some(DESCRIPTION_MAX_LEN)),
                ),
            ],
            &["list_id"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        validation::positive_id("list_id", self.list_id)?;
        if let Some(name) = &self.name {
            self.name = Some(validation::text("name", name, 1, Some(NAME_MAX_LEN))?);
        }
        self.tags = self.tags.map(validation::tags);
        if let Some(d) = &self.description {
            self.description = Some(validation::text(
                "description",
                d,
                0,
                Some(DESCRIPTION_MAX_LEN),
            )?);
        }
        if let Value::Object(map) = self.payload() {
            require_changes(&map, "update_mailing_list")?;
        }
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GetCampaignsParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
}

impl Default for GetCampaignsParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            status: None,
        }
    }
}

impl GetCampaignsParams {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        pairs
    }
}

impl ToolParams for GetCampaignsParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("page", page_schema()),
                ("per_page", per_page_schema()),
                (
                    "status",
                    ToolSchema::string_enum(CampaignStatus::VALUES)
                        .describe("Only return campaigns in this status"),
                ),
            ],
            &[],
        )
    }

    fn validate(self) -> Result<Self> {
        validation::page(self.page, self.per_page)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignIdParams {
    pub campaign_id: i64,
}

impl ToolParams for CampaignIdParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [("campaign_id", ToolSchema::id().describe("Campaign ID"))],
            &["campaign_id"],
        )
    }

    fn validate(self) -> Result<Self> {
        validation::positive_id("campaign_id", self.campaign_id)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignParams {
    pub name: String,
    pub subject: String,
    pub lists: Vec<i64>,
    #[serde(rename = "type", default = "CreateCampaignParams::default_type")]
    pub campaign_type: CampaignType,
    #[serde(default = "CreateCampaignParams::default_content_type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub altbody: Option<String>,
    #[serde(default)]
    pub template_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub send_at: Option<String>,
    #[serde(default)]
    pub messenger: Option<String>,
}

impl CreateCampaignParams {
    fn default_type() -> CampaignType {
        CampaignType::Regular
    }

    fn default_content_type() -> ContentType {
        ContentType::Richtext
    }

    pub fn payload(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".into(), self.name.clone().into());
        map.insert("subject".into(), self.subject.clone().into());
        map.insert("lists".into(), self.lists.clone().into());
        map.insert("type".into(), self.campaign_type.as_str().into());
        map.insert("content_type".into(), self.content_type.as_str().into());
        map.insert("tags".into(), self.tags.clone().into());
        insert_some(&mut map, "from_email", self.from_email.clone());
        insert_some(&mut map, "body", self.body.clone());
        insert_some(&mut map, "altbody", self.altbody.clone());
        insert_some(&mut map, "template_id", self.template_id);
        insert_some(&mut map, "send_at", self.send_at.clone());
        insert_some(&mut map, "messenger", self.messenger.clone());
        Value::Object(map)
    }
}

impl ToolParams for CreateCampaignParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("name", name_schema("Campaign name")),
                (
                    "subject",
                    ToolSchema::string_with_length(Some(1), Some(SUBJECT_MAX_LEN))
                        .describe("Email subject line"),
                ),
                ("lists", ids_schema("Target mailing list IDs").min_items(1)),
                (
                    "type",
                    ToolSchema::string_enum(CampaignType::VALUES).with_default("regular"),
                ),
                (
                    "content_type",
                    ToolSchema::string_enum(ContentType::VALUES).with_default("richtext"),
                ),
                ("from_email", ToolSchema::string().describe("From address")),
                (
                    "body",
                    ToolSchema::string()
                        .describe("Campaign body; required unless template_id is set"),
                ),
                ("altbody", ToolSchema::string().describe("Plain text alternative body")),
                ("template_id", ToolSchema::id().describe("Template ID to use")),
                ("tags", tags_schema()),
                (
                    "send_at",
                    ToolSchema::string_format("date-time")
                        .describe("Scheduled send time (RFC 3339)"),
                ),
                ("messenger", ToolSchema::string().describe("Messenger backend, e.g. email")),
            ],
            &["name", "subject", "lists"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        self.name = validation::text("name", &self.name, 1, Some(NAME_MAX_LEN))?;
        self.subject = validation::text("subject", &self.subject, 1, Some(SUBJECT_MAX_LEN))?;
        validation::non_empty_ids("lists", &self.lists)?;
        if let Some(id) = self.template_id {
            validation::positive_id("template_id", id)?;
        }
        self.body = self.body.filter(|b| !b.trim().is_empty());
        if self.body.is_none() && self.template_id.is_none() {
            return Err(ListmonkError::validation(
                "either body or template_id must be provided",
            ));
        }
        if let Some(from) = &self.from_email {
            self.from_email = Some(from.trim().to_string()).filter(|f| !f.is_empty());
        }
        if let Some(send_at) = &self.send_at {
            self.send_at = Some(validation::timestamp("send_at", send_at)?);
        }
        self.tags = validation::tags(self.tags);
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCampaignParams {
    pub campaign_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub lists: Option<Vec<i64>>,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub altbody: Option<String>,
    #[serde(default)]
    pub template_id: Option<i64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub send_at: Option<String>,
}

impl UpdateCampaignParams {
    pub fn payload(&self) -> Value {
        let mut map = Map::new();
        insert_some(&mut map, "name", self.name.clone());
        insert_some(&mut map, "subject", self.subject.clone());
        insert_some(&mut map, "lists", self.lists.clone());
        insert_some(&mut map, "from_email", self.from_email.clone());
        insert_some(&mut map, "body", self.body.clone());
        insert_some(&mut map, "altbody", self.altbody.clone());
        insert_some(&mut map, "template_id", self.template_id);
        insert_some(&mut map, "tags", self.tags.clone());
        insert_some(&mut map, "send_at", self.send_at.clone());
        Value::Object(map)
    }
}

impl ToolParams for UpdateCampaignParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("campaign_id", ToolSchema::id().describe("Campaign ID")),
                ("name", name_schema("New campaign name")),
                (
                    "subject",
                    ToolSchema::string_with_length(Some(1), Some(SUBJECT_MAX_LEN)),
                ),
                ("lists", ids_schema("New target mailing list IDs").min_items(1)),
                ("from_email", ToolSchema::string()),
                ("body", ToolSchema::string()),
                ("altbody", ToolSchema::string()),
                ("template_id", ToolSchema::id()),
                ("tags", tags_schema()),
                ("send_at", ToolSchema::string_format("date-time")),
            ],
            &["campaign_id"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        validation::positive_id("campaign_id", self.campaign_id)?;
        if let Some(name) = &self.name {
            self.name = Some(validation::text("name", name, 1, Some(NAME_MAX_LEN))?);
        }
        if let Some(subject) = &self.subject {
            self.subject = Some(validation::text("subject", subject, 1, Some(SUBJECT_MAX_LEN))?);
        }
        if let Some(lists) = &self.lists {
            validation::non_empty_ids("lists", lists)?;
        }
        if let Some(id) = self.template_id {
            validation::positive_id("template_id", id)?;
        }
        if let Some(send_at) = &self.send_at {
            self.send_at = Some(validation::timestamp("send_at", send_at)?);
        }
        self.tags = self.tags.map(validation::tags);
        if let Value::Object(map) = self.payload() {
            require_changes(&map, "update_campaign")?;
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleCampaignParams {
    pub campaign_id: i64,
    pub send_at: String,
}

impl ToolParams for ScheduleCampaignParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("campaign_id", ToolSchema::id().describe("Campaign ID")),
                (
                    "send_at",
                    ToolSchema::string_format("date-time").describe("Send time (RFC 3339)"),
                ),
            ],
            &["campaign_id", "send_at"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        validation::positive_id("campaign_id", self.campaign_id)?;
        self.send_at = validation::timestamp("send_at", &self.send_at)?;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Templates & transactional mail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateIdParams {
    pub template_id: i64,
}

impl ToolParams for TemplateIdParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [("template_id", ToolSchema::id().describe("Template ID"))],
            &["template_id"],
        )
    }

    fn validate(self) -> Result<Self> {
        validation::positive_id("template_id", self.template_id)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplateParams {
    pub name: String,
    pub body: String,
    #[serde(rename = "type", default = "CreateTemplateParams::default_type")]
    pub template_type: TemplateType,
    #[serde(default)]
    pub is_default: bool,
}

impl CreateTemplateParams {
    fn default_type() -> TemplateType {
        TemplateType::Campaign
    }

    pub fn payload(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "body": self.body,
            "type": self.template_type,
            "is_default": self.is_default,
        })
    }
}

impl ToolParams for CreateTemplateParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("name", name_schema("Template name")),
                (
                    "body",
                    ToolSchema::string_with_length(Some(1), None).describe("Template HTML body"),
                ),
                (
                    "type",
                    ToolSchema::string_enum(TemplateType::VALUES).with_default("campaign"),
                ),
                ("is_default", ToolSchema::boolean().with_default(false)),
            ],
            &["name", "body"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        self.name = validation::text("name", &self.name, 1, Some(NAME_MAX_LEN))?;
        if self.body.trim().is_empty() {
            return Err(ListmonkError::validation("body must not be empty"));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTemplateParams {
    pub template_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_default: Option<bool>,
}

impl UpdateTemplateParams {
    pub fn payload(&self) -> Value {
        let mut map = Map::new();
        insert_some(&mut map, "name", self.name.clone());
        insert_some(&mut map, "body", self.body.clone());
        insert_some(&mut map, "is_default", self.is_default);
        Value::Object(map)
    }
}

impl ToolParams for UpdateTemplateParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                ("template_id", ToolSchema::id().describe("Template ID")),
                ("name", name_schema("New template name")),
                ("body", ToolSchema::string_with_length(Some(1), None)),
                ("is_default", ToolSchema::boolean()),
            ],
            &["template_id"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        validation::positive_id("template_id", self.template_id)?;
        if let Some(name) = &self.name {
            self.name = Some(validation::text("name", name, 1, Some(NAME_MAX_LEN))?);
        }
        if matches!(&self.body, Some(b) if b.trim().is_empty()) {
            return Err(ListmonkError::validation("body must not be empty"));
        }
        if let Value::Object(map) = self.payload() {
            require_changes(&map, "update_template")?;
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionalEmailParams {
    pub subscriber_email: String,
    pub template_id: i64,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default = "TransactionalEmailParams::default_content_type")]
    pub content_type: TxContentType,
    #[serde(default)]
    pub from_email: Option<String>,
}

impl TransactionalEmailParams {
    fn default_content_type() -> TxContentType {
        TxContentType::Html
    }

    pub fn payload(&self) -> Value {
        let mut body = serde_json::json!({
            "subscriber_email": self.subscriber_email,
            "template_id": self.template_id,
            "data": self.data,
            "content_type": self.content_type,
        });
        if let Some(from) = &self.from_email {
            body["from_email"] = Value::from(from.clone());
        }
        body
    }
}

impl ToolParams for TransactionalEmailParams {
    fn schema() -> ToolSchema {
        ToolSchema::object(
            [
                (
                    "subscriber_email",
                    ToolSchema::string_format("email").describe("Recipient email address"),
                ),
                ("template_id", ToolSchema::id().describe("Transactional template ID")),
                (
                    "data",
                    ToolSchema::any_object().describe("Variables available to the template"),
                ),
                (
                    "content_type",
                    ToolSchema::string_enum(TxContentType::VALUES).with_default("html"),
                ),
                ("from_email", ToolSchema::string().describe("From address")),
            ],
            &["subscriber_email", "template_id"],
        )
    }

    fn validate(mut self) -> Result<Self> {
        self.subscriber_email = validation::email("subscriber_email", &self.subscriber_email)?;
        validation::positive_id("template_id", self.template_id)?;
        Ok(self)
    }
}
