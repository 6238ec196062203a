//! MCP tool catalog and dispatch
//!
//! One tool per supported Listmonk operation. Arguments are parsed and
//! validated with the matching [`ToolParams`] type before the client is
//! touched, so invalid input never produces a network call.

use listmonk_core::models::ListAction;
use listmonk_core::params::{
    AddSubscriberParams, CampaignIdParams, CreateCampaignParams, CreateListParams,
    CreateTemplateParams, EmailLookupParams, GetCampaignsParams, GetSubscribersParams,
    ListIdParams, ListMembershipParams, ListSubscribersParams, NoParams, PageParams,
    ScheduleCampaignParams, SubscriberIdParams, SubscriberStatusParams, TemplateIdParams,
    TransactionalEmailParams, UpdateCampaignParams, UpdateListParams, UpdateSubscriberParams,
    UpdateTemplateParams,
};
use listmonk_core::{ListmonkError, Result, ToolParams, ToolSchema};
use serde::Serialize;
use serde_json::{json, Value};

use crate::client::ListmonkClient;

/// Name, description and input schema of one tool
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: ToolSchema,
}

impl ToolDefinition {
    fn new<P: ToolParams>(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            input_schema: P::schema(),
        }
    }

    /// Catalog entry as printed by the CLI
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema,
        })
    }
}

/// Every tool, in the order they are advertised
pub fn catalog() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new::<NoParams>(
            "check_listmonk_health",
            "Check if the Listmonk server is healthy and accessible",
        ),
        // Subscribers
        ToolDefinition::new::<GetSubscribersParams>(
            "get_subscribers",
            "List subscribers with pagination, ordering and an optional Listmonk SQL query filter",
        ),
        ToolDefinition::new::<SubscriberIdParams>("get_subscriber", "Get a subscriber by ID"),
        ToolDefinition::new::<EmailLookupParams>(
            "get_subscriber_by_email",
            "Get a subscriber by email address",
        ),
        ToolDefinition::new::<AddSubscriberParams>(
            "add_subscriber",
            "Add a new subscriber and subscribe them to mailing lists",
        ),
        ToolDefinition::new::<UpdateSubscriberParams>(
            "update_subscriber",
            "Update an existing subscriber; only the supplied fields change",
        ),
        ToolDefinition::new::<SubscriberIdParams>(
            "remove_subscriber",
            "Permanently delete a subscriber",
        ),
        ToolDefinition::new::<SubscriberStatusParams>(
            "change_subscriber_status",
            "Change a subscriber's status (enabled, disabled, blocklisted)",
        ),
        ToolDefinition::new::<ListMembershipParams>(
            "add_subscribers_to_lists",
            "Add subscribers to mailing lists",
        ),
        ToolDefinition::new::<ListMembershipParams>(
            "remove_subscribers_from_lists",
            "Remove subscribers from mailing lists",
        ),
        // Lists
        ToolDefinition::new::<PageParams>("get_mailing_lists", "List mailing lists"),
        ToolDefinition::new::<ListIdParams>("get_mailing_list", "Get a mailing list by ID"),
        ToolDefinition::new::<CreateListParams>(
            "create_mailing_list",
            "Create a new mailing list",
        ),
        ToolDefinition::new::<UpdateListParams>(
            "update_mailing_list",
            "Update a mailing list; only the supplied fields change",
        ),
        ToolDefinition::new::<ListIdParams>("delete_mailing_list", "Delete a mailing list"),
        ToolDefinition::new::<ListSubscribersParams>(
            "get_list_subscribers",
            "List the subscribers of a mailing list",
        ),
        // Campaigns
        ToolDefinition::new::<GetCampaignsParams>(
            "get_campaigns",
            "List campaigns, optionally filtered by status",
        ),
        ToolDefinition::new::<CampaignIdParams>("get_campaign", "Get a campaign by ID"),
        ToolDefinition::new::<CreateCampaignParams>(
            "create_campaign",
            "Create a new campaign; either body or template_id is required",
        ),
        ToolDefinition::new::<UpdateCampaignParams>(
            "update_campaign",
            "Update a campaign; only the supplied fields change",
        ),
        ToolDefinition::new::<CampaignIdParams>(
            "send_campaign",
            "Start sending a campaign immediately",
        ),
        ToolDefinition::new::<ScheduleCampaignParams>(
            "schedule_campaign",
            "Schedule a campaign for delivery at send_at (RFC 3339)",
        ),
        ToolDefinition::new::<CampaignIdParams>(
            "get_campaign_preview",
            "Get the rendered HTML preview of a campaign",
        ),
        // Templates
        ToolDefinition::new::<NoParams>("get_templates", "List all templates"),
        ToolDefinition::new::<TemplateIdParams>("get_template", "Get a template by ID"),
        ToolDefinition::new::<CreateTemplateParams>("create_template", "Create a new template"),
        ToolDefinition::new::<UpdateTemplateParams>(
            "update_template",
            "Update a template; only the supplied fields change",
        ),
        ToolDefinition::new::<TemplateIdParams>("delete_template", "Delete a template"),
        // Transactional
        ToolDefinition::new::<TransactionalEmailParams>(
            "send_transactional_email",
            "Send a transactional email to a subscriber using a tx template",
        ),
    ]
}

/// Whether `name` is a tool in the catalog
pub fn is_known(name: &str) -> bool {
    catalog().iter().any(|tool| tool.name == name)
}

/// Successful tool result
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub data: Value,
    pub message: String,
}

impl ToolOutput {
    fn new<T: Serialize>(data: &T, message: impl Into<String>) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_value(data)?,
            message: message.into(),
        })
    }

    /// `{"success": true, "data": ..., "message": ...}`
    pub fn to_json(&self) -> Value {
        json!({
            "success": true,
            "data": self.data,
            "message": self.message,
        })
    }
}

/// Structured payload for a failed invocation
pub fn failure_json(err: &ListmonkError) -> Value {
    json!({
        "success": false,
        "error": err.to_json(),
    })
}

/// Run one tool. Returns `None` if no tool has that name.
pub async fn dispatch(
    client: &ListmonkClient,
    name: &str,
    args: Value,
) -> Option<Result<ToolOutput>> {
    if !is_known(name) {
        return None;
    }
    Some(execute(client, name, args).await)
}

async fn execute(client: &ListmonkClient, name: &str, args: Value) -> Result<ToolOutput> {
    match name {
        "check_listmonk_health" => {
            NoParams::parse(args)?;
            let healthy = client.health_check().await?;
            ToolOutput::new(
                &json!({
                    "status": if healthy { "healthy" } else { "unhealthy" },
                    "listmonk_health": healthy,
                    "server_url": client.base_url(),
                }),
                if healthy {
                    "Listmonk is healthy"
                } else {
                    "Listmonk reported an unhealthy state"
                },
            )
        }

        "get_subscribers" => {
            let params = GetSubscribersParams::parse(args)?;
            let page = client.get_subscribers(&params).await?;
            let message = format!(
                "Retrieved {} of {} subscribers",
                page.results.len(),
                page.total
            );
            ToolOutput::new(&page, message)
        }
        "get_subscriber" => {
            let params = SubscriberIdParams::parse(args)?;
            let subscriber = client.get_subscriber(params.subscriber_id).await?;
            ToolOutput::new(&subscriber, format!("Retrieved subscriber {}", subscriber.id))
        }
        "get_subscriber_by_email" => {
            let params = EmailLookupParams::parse(args)?;
            let subscriber = client.get_subscriber_by_email(&params).await?;
            ToolOutput::new(&subscriber, format!("Retrieved subscriber {}", subscriber.email))
        }
        "add_subscriber" => {
            let params = AddSubscriberParams::parse(args)?;
            let subscriber = client.create_subscriber(&params).await?;
            ToolOutput::new(
                &subscriber,
                format!(
                    "Subscriber {} added successfully with ID {}",
                    subscriber.email, subscriber.id
                ),
            )
        }
        "update_subscriber" => {
            let params = UpdateSubscriberParams::parse(args)?;
            let subscriber = client.update_subscriber(&params).await?;
            ToolOutput::new(
                &subscriber,
                format!("Subscriber {} updated successfully", params.subscriber_id),
            )
        }
        "remove_subscriber" => {
            let params = SubscriberIdParams::parse(args)?;
            let removed = client.delete_subscriber(params.subscriber_id).await?;
            ToolOutput::new(
                &removed,
                format!("Subscriber {} removed successfully", params.subscriber_id),
            )
        }
        "change_subscriber_status" => {
            let params = SubscriberStatusParams::parse(args)?;
            let subscriber = client.set_subscriber_status(&params).await?;
            ToolOutput::new(
                &subscriber,
                format!(
                    "Subscriber {} status changed to {}",
                    params.subscriber_id, params.status
                ),
            )
        }
        "add_subscribers_to_lists" => {
            let params = ListMembershipParams::parse(args)?;
            let done = client.manage_list_membership(&params, ListAction::Add).await?;
            ToolOutput::new(
                &done,
                format!(
                    "Added {} subscriber(s) to {} list(s)",
                    params.subscriber_ids.len(),
                    params.list_ids.len()
                ),
            )
        }
        "remove_subscribers_from_lists" => {
            let params = ListMembershipParams::parse(args)?;
            let done = client.manage_list_membership(&params, ListAction::Remove).await?;
            ToolOutput::new(
                &done,
                format!(
                    "Removed {} subscriber(s) from {} list(s)",
                    params.subscriber_ids.len(),
                    params.list_ids.len()
                ),
            )
        }

        "get_mailing_lists" => {
            let params = PageParams::parse(args)?;
            let page = client.get_lists(&params).await?;
            let message = format!(
                "Retrieved {} of {} mailing lists",
                page.results.len(),
                page.total
            );
            ToolOutput::new(&page, message)
        }
        "get_mailing_list" => {
            let params = ListIdParams::parse(args)?;
            let list = client.get_list(params.list_id).await?;
            ToolOutput::new(&list, format!("Retrieved mailing list {}", list.name))
        }
        "create_mailing_list" => {
            let params = CreateListParams::parse(args)?;
            let list = client.create_list(&params).await?;
            ToolOutput::new(
                &list,
                format!("Mailing list '{}' created with ID {}", list.name, list.id),
            )
        }
        "update_mailing_list" => {
            let params = UpdateListParams::parse(args)?;
            let list = client.update_list(&params).await?;
            ToolOutput::new(
                &list,
                format!("Mailing list {} updated successfully", params.list_id),
            )
        }
        "delete_mailing_list" => {
            let params = ListIdParams::parse(args)?;
            let deleted = client.delete_list(params.list_id).await?;
            ToolOutput::new(
                &deleted,
                format!("Mailing list {} deleted successfully", params.list_id),
            )
        }
        "get_list_subscribers" => {
            let params = ListSubscribersParams::parse(args)?;
            let page = client.get_list_subscribers(&params).await?;
            let message = format!(
                "Retrieved {} of {} subscribers in list {}",
                page.results.len(),
                page.total,
                params.list_id
            );
            ToolOutput::new(&page, message)
        }

        "get_campaigns" => {
            let params = GetCampaignsParams::parse(args)?;
            let page = client.get_campaigns(&params).await?;
            let message = format!("Retrieved {} of {} campaigns", page.results.len(), page.total);
            ToolOutput::new(&page, message)
        }
        "get_campaign" => {
            let params = CampaignIdParams::parse(args)?;
            let campaign = client.get_campaign(params.campaign_id).await?;
            ToolOutput::new(&campaign, format!("Retrieved campaign {}", campaign.name))
        }
        "create_campaign" => {
            let params = CreateCampaignParams::parse(args)?;
            let campaign = client.create_campaign(&params).await?;
            ToolOutput::new(
                &campaign,
                format!("Campaign '{}' created with ID {}", campaign.name, campaign.id),
            )
        }
        "update_campaign" => {
            let params = UpdateCampaignParams::parse(args)?;
            let campaign = client.update_campaign(&params).await?;
            ToolOutput::new(
                &campaign,
                format!("Campaign {} updated successfully", params.campaign_id),
            )
        }
        "send_campaign" => {
            let params = CampaignIdParams::parse(args)?;
            let campaign = client.send_campaign(params.campaign_id).await?;
            ToolOutput::new(
                &campaign,
                format!("Campaign {} is now {}", params.campaign_id, campaign.status),
            )
        }
        "schedule_campaign" => {
            let params = ScheduleCampaignParams::parse(args)?;
            let campaign = client.schedule_campaign(&params).await?;
            ToolOutput::new(
                &campaign,
                format!(
                    "Campaign {} scheduled for {}",
                    params.campaign_id, params.send_at
                ),
            )
        }
        "get_campaign_preview" => {
            let params = CampaignIdParams::parse(args)?;
            let html = client.get_campaign_preview(params.campaign_id).await?;
            ToolOutput::new(
                &json!({ "campaign_id": params.campaign_id, "preview": html }),
                format!("Rendered preview of campaign {}", params.campaign_id),
            )
        }

        "get_templates" => {
            NoParams::parse(args)?;
            let templates = client.get_templates().await?;
            let message = format!("Retrieved {} templates", templates.len());
            ToolOutput::new(&templates, message)
        }
        "get_template" => {
            let params = TemplateIdParams::parse(args)?;
            let template = client.get_template(params.template_id).await?;
            ToolOutput::new(&template, format!("Retrieved template {}", template.name))
        }
        "create_template" => {
            let params = CreateTemplateParams::parse(args)?;
            let template = client.create_template(&params).await?;
            ToolOutput::new(
                &template,
                format!("Template '{}' created with ID {}", template.name, template.id),
            )
        }
        "update_template" => {
            let params = UpdateTemplateParams::parse(args)?;
            let template = client.update_template(&params).await?;
            ToolOutput::new(
                &template,
                format!("Template {} updated successfully", params.template_id),
            )
        }
        "delete_template" => {
            let params = TemplateIdParams::parse(args)?;
            let deleted = client.delete_template(params.template_id).await?;
            ToolOutput::new(
                &deleted,
                format!("Template {} deleted successfully", params.template_id),
            )
        }

        "send_transactional_email" => {
            let params = TransactionalEmailParams::parse(args)?;
            let sent = client.send_transactional_email(&params).await?;
            ToolOutput::new(
                &sent,
                format!("Transactional email sent to {}", params.subscriber_email),
            )
        }

        other => Err(ListmonkError::validation(format!("unknown tool: {}", other))),
    }
}
