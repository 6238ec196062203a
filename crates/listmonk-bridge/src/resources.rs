//! Read-only MCP resources rendered as markdown
//!
//! Collections are advertised in `resources/list`; single entities are
//! addressed by id (or email, for subscribers) and described in the server
//! instructions.

use std::fmt;
use std::str::FromStr;

use listmonk_core::models::{Campaign, MailingList, Page, Subscriber, Template};
use listmonk_core::params::{EmailLookupParams, GetCampaignsParams, GetSubscribersParams};
use listmonk_core::{validation, ListmonkError, Result};
use serde_json::Value;

use crate::client::ListmonkClient;

pub const SCHEME: &str = "listmonk://";
pub const MIME_TYPE: &str = "text/markdown";

/// Entries shown in collection resources
const COLLECTION_LIMIT: u32 = 50;

/// A resource addressable by the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUri {
    Subscribers,
    Lists,
    Campaigns,
    Templates,
    Subscriber(i64),
    SubscriberByEmail(String),
    List(i64),
    Campaign(i64),
    Template(i64),
}

/// Static description of an advertised resource
#[derive(Debug, Clone, Copy)]
pub struct ResourceInfo {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Collection resources, in the order they are advertised
pub const COLLECTIONS: &[ResourceInfo] = &[
    ResourceInfo {
        uri: "listmonk://subscribers",
        name: "Subscribers",
        description: "First 50 subscribers with status and list count",
    },
    ResourceInfo {
        uri: "listmonk://lists",
        name: "Mailing lists",
        description: "All mailing lists with type, opt-in and subscriber count",
    },
    ResourceInfo {
        uri: "listmonk://campaigns",
        name: "Campaigns",
        description: "First 50 campaigns with status and statistics",
    },
    ResourceInfo {
        uri: "listmonk://templates",
        name: "Templates",
        description: "All templates",
    },
];

/// Per-entity URI forms, for the server instructions
pub const ENTITY_URI_FORMS: &[&str] = &[
    "listmonk://subscriber/{id}",
    "listmonk://subscriber/email/{email}",
    "listmonk://list/{id}",
    "listmonk://campaign/{id}",
    "listmonk://template/{id}",
];

fn parse_id(field: &str, raw: &str) -> Result<i64> {
    let id = raw.parse::<i64>().map_err(|_| {
        ListmonkError::validation(format!("{} must be a positive integer, got '{}'", field, raw))
    })?;
    validation::positive_id(field, id)
}

impl FromStr for ResourceUri {
    type Err = ListmonkError;

    /// Unknown URIs are reported as not found; malformed ids as validation
    /// errors.
    fn from_str(uri: &str) -> Result<Self> {
        let unknown = || ListmonkError::not_found(format!("unknown resource: {}", uri));
        let path = uri.strip_prefix(SCHEME).ok_or_else(unknown)?;
        let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();

        match segments.as_slice() {
            ["subscribers"] => Ok(Self::Subscribers),
            ["lists"] => Ok(Self::Lists),
            ["campaigns"] => Ok(Self::Campaigns),
            ["templates"] => Ok(Self::Templates),
            ["subscriber", "email", email] => {
                let decoded = urlencoding::decode(email).map_err(|e| {
                    ListmonkError::validation(format!("email is not valid UTF-8: {}", e))
                })?;
                Ok(Self::SubscriberByEmail(validation::email("email", &decoded)?))
            }
            ["subscriber", id] => Ok(Self::Subscriber(parse_id("subscriber_id", id)?)),
            ["list", id] => Ok(Self::List(parse_id("list_id", id)?)),
            ["campaign", id] => Ok(Self::Campaign(parse_id("campaign_id", id)?)),
            ["template", id] => Ok(Self::Template(parse_id("template_id", id)?)),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscribers => write!(f, "{}subscribers", SCHEME),
            Self::Lists => write!(f, "{}lists", SCHEME),
            Self::Campaigns => write!(f, "{}campaigns", SCHEME),
            Self::Templates => write!(f, "{}templates", SCHEME),
            Self::Subscriber(id) => write!(f, "{}subscriber/{}", SCHEME, id),
            Self::SubscriberByEmail(email) => {
                write!(f, "{}subscriber/email/{}", SCHEME, urlencoding::encode(email))
            }
            Self::List(id) => write!(f, "{}list/{}", SCHEME, id),
            Self::Campaign(id) => write!(f, "{}campaign/{}", SCHEME, id),
            Self::Template(id) => write!(f, "{}template/{}", SCHEME, id),
        }
    }
}

/// Fetch a resource and render it as markdown.
pub async fn read(client: &ListmonkClient, uri: &ResourceUri) -> Result<String> {
    match uri {
        ResourceUri::Subscribers => {
            let params = GetSubscribersParams {
                per_page: COLLECTION_LIMIT,
                ..GetSubscribersParams::default()
            };
            Ok(render_subscribers(&client.get_subscribers(&params).await?))
        }
        ResourceUri::Lists => Ok(render_lists(&client.get_all_lists().await?)),
        ResourceUri::Campaigns => {
            let params = GetCampaignsParams {
                per_page: COLLECTION_LIMIT,
                ..GetCampaignsParams::default()
            };
            Ok(render_campaigns(&client.get_campaigns(&params).await?))
        }
        ResourceUri::Templates => Ok(render_templates(&client.get_templates().await?)),
        ResourceUri::Subscriber(id) => Ok(render_subscriber(&client.get_subscriber(*id).await?)),
        ResourceUri::SubscriberByEmail(email) => {
            let params = EmailLookupParams {
                email: email.clone(),
            };
            Ok(render_subscriber(
                &client.get_subscriber_by_email(&params).await?,
            ))
        }
        ResourceUri::List(id) => Ok(render_list(&client.get_list(*id).await?)),
        ResourceUri::Campaign(id) => Ok(render_campaign(&client.get_campaign(*id).await?)),
        ResourceUri::Template(id) => Ok(render_template(&client.get_template(*id).await?)),
    }
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn attribute_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn render_subscriber(subscriber: &Subscriber) -> String {
    let mut lines = vec![
        format!("# Subscriber: {}", subscriber.name),
        String::new(),
        format!("- **ID**: {}", subscriber.id),
        format!("- **UUID**: {}", or_dash(subscriber.uuid.as_deref())),
        format!("- **Email**: {}", subscriber.email),
        format!("- **Status**: {}", subscriber.status),
        format!("- **Created**: {}", or_dash(subscriber.created_at.as_deref())),
        format!("- **Updated**: {}", or_dash(subscriber.updated_at.as_deref())),
        String::new(),
        "## Lists".to_string(),
        String::new(),
    ];

    if subscriber.lists.is_empty() {
        lines.push("_Not subscribed to any list._".to_string());
    }
    for list in &subscriber.lists {
        lines.push(format!(
            "- {} (ID {}, {})",
            list.name,
            list.id,
            or_dash(list.subscription_status.as_deref())
        ));
    }

    lines.push(String::new());
    lines.push("## Attributes".to_string());
    lines.push(String::new());
    if subscriber.attribs.is_empty() {
        lines.push("_None._".to_string());
    }
    for (key, value) in &subscriber.attribs {
        lines.push(format!("- **{}**: {}", key, attribute_value(value)));
    }

    lines.join("\n")
}

pub fn render_subscribers(page: &Page<Subscriber>) -> String {
    let mut lines = vec![
        "# Subscribers".to_string(),
        String::new(),
        format!(
            "Showing {} of {} subscribers.",
            page.results.len(),
            page.total
        ),
        String::new(),
    ];
    for subscriber in &page.results {
        lines.push(format!(
            "- **{}** <{}> (ID {}, {}, {} lists)",
            subscriber.name,
            subscriber.email,
            subscriber.id,
            subscriber.status,
            subscriber.lists.len()
        ));
    }
    lines.join("\n")
}

pub fn render_list(list: &MailingList) -> String {
    [
        format!("# Mailing List: {}", list.name),
        String::new(),
        format!("- **ID**: {}", list.id),
        format!("- **UUID**: {}", or_dash(list.uuid.as_deref())),
        format!("- **Type**: {}", list.list_type),
        format!("- **Opt-in**: {}", or_dash(list.optin.as_deref())),
        format!("- **Subscribers**: {}", list.subscriber_count),
        format!("- **Tags**: {}", join_or_dash(&list.tags)),
        format!("- **Created**: {}", or_dash(list.created_at.as_deref())),
        format!("- **Updated**: {}", or_dash(list.updated_at.as_deref())),
        String::new(),
        "## Description".to_string(),
        String::new(),
        or_dash(list.description.as_deref()).to_string(),
    ]
    .join("\n")
}

pub fn render_lists(page: &Page<MailingList>) -> String {
    let mut lines = vec![
        "# Mailing Lists".to_string(),
        String::new(),
        format!("{} lists.", page.results.len()),
        String::new(),
    ];
    for list in &page.results {
        lines.push(format!(
            "- **{}** (ID {}, {}, {} opt-in, {} subscribers)",
            list.name,
            list.id,
            list.list_type,
            or_dash(list.optin.as_deref()),
            list.subscriber_count
        ));
    }
    lines.join("\n")
}

pub fn render_campaign(campaign: &Campaign) -> String {
    let lists: Vec<String> = campaign
        .lists
        .iter()
        .map(|l| match l.id {
            Some(id) => format!("{} (ID {})", l.name, id),
            None => format!("{} (deleted)", l.name),
        })
        .collect();

    let mut lines = vec![
        format!("# Campaign: {}", campaign.name),
        String::new(),
        format!("- **ID**: {}", campaign.id),
        format!("- **Subject**: {}", campaign.subject),
        format!("- **Status**: {}", campaign.status),
        format!("- **Type**: {}", or_dash(campaign.campaign_type.as_deref())),
        format!(
            "- **Content type**: {}",
            or_dash(campaign.content_type.as_deref())
        ),
        format!("- **From**: {}", or_dash(campaign.from_email.as_deref())),
        format!("- **Lists**: {}", join_or_dash(&lists)),
        format!("- **Tags**: {}", join_or_dash(&campaign.tags)),
        format!("- **Send at**: {}", or_dash(campaign.send_at.as_deref())),
        format!("- **Created**: {}", or_dash(campaign.created_at.as_deref())),
        String::new(),
        "## Statistics".to_string(),
        String::new(),
        format!("- **Sent**: {} / {}", campaign.sent, campaign.to_send),
        format!("- **Views**: {}", campaign.views),
        format!("- **Clicks**: {}", campaign.clicks),
    ];
    if let Some(template_id) = campaign.template_id {
        lines.insert(10, format!("- **Template**: {}", template_id));
    }
    lines.join("\n")
}

pub fn render_campaigns(page: &Page<Campaign>) -> String {
    let mut lines = vec![
        "# Campaigns".to_string(),
        String::new(),
        format!("Showing {} of {} campaigns.", page.results.len(), page.total),
        String::new(),
    ];
    for campaign in &page.results {
        lines.push(format!(
            "- **{}** (ID {}, {}) \"{}\": {} sent, {} views, {} clicks",
            campaign.name,
            campaign.id,
            campaign.status,
            campaign.subject,
            campaign.sent,
            campaign.views,
            campaign.clicks
        ));
    }
    lines.join("\n")
}

pub fn render_template(template: &Template) -> String {
    [
        format!("# Template: {}", template.name),
        String::new(),
        format!("- **ID**: {}", template.id),
        format!("- **Type**: {}", or_dash(template.template_type.as_deref())),
        format!("- **Default**: {}", if template.is_default { "yes" } else { "no" }),
        format!("- **Created**: {}", or_dash(template.created_at.as_deref())),
        format!("- **Updated**: {}", or_dash(template.updated_at.as_deref())),
        String::new(),
        "## Body".to_string(),
        String::new(),
        "```html".to_string(),
        template.body.clone(),
        "```".to_string(),
    ]
    .join("\n")
}

pub fn render_templates(templates: &[Template]) -> String {
    let mut lines = vec![
        "# Templates".to_string(),
        String::new(),
        format!("{} templates.", templates.len()),
        String::new(),
    ];
    for template in templates {
        lines.push(format!(
            "- **{}** (ID {}, {}{})",
            template.name,
            template.id,
            or_dash(template.template_type.as_deref()),
            if template.is_default { ", default" } else { "" }
        ));
    }
    lines.join("\n")
}
