//! RMCP-based MCP server for the Listmonk bridge
//!
//! Uses the official rmcp crate to implement the Model Context Protocol over
//! stdio. Tool calls and resource reads are stateless: each one is validated,
//! forwarded to Listmonk once and shaped into an MCP result.

use std::sync::Arc;

use anyhow::Result;
use listmonk_core::{ErrorKind, ListmonkConfig, ListmonkError};
use rmcp::model::{
    AnnotateAble, CallToolRequestParam, CallToolResult, Implementation, ListResourcesResult,
    ListToolsResult, PaginatedRequestParam, RawResource, ReadResourceRequestParam,
    ReadResourceResult, Resource, ResourceContents, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use tokio::io::{stdin, stdout};
use tracing::{debug, info, warn};

use crate::client::ListmonkClient;
use crate::resources::{self, ResourceUri};
use crate::tools;

/// Listmonk bridge service
#[derive(Clone, Debug)]
pub struct ListmonkBridge {
    client: ListmonkClient,
    server_name: String,
}

impl ListmonkBridge {
    pub fn new(client: ListmonkClient, server_name: impl Into<String>) -> Self {
        Self {
            client,
            server_name: server_name.into(),
        }
    }

    /// Build the HTTP client and bridge from validated configuration
    pub fn from_config(config: &ListmonkConfig) -> Result<Self> {
        let client = ListmonkClient::new(config)?;
        Ok(Self::new(client, config.server_name.clone()))
    }

    pub fn client(&self) -> &ListmonkClient {
        &self.client
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Tool definitions as advertised in `tools/list`
    pub fn tool_definitions(&self) -> Vec<Tool> {
        tools::catalog()
            .into_iter()
            .map(|tool| {
                Tool::new(
                    tool.name,
                    tool.description,
                    Arc::new(tool.input_schema.to_json_object()),
                )
            })
            .collect()
    }

    /// Collection resources as advertised in `resources/list`
    pub fn resource_definitions(&self) -> Vec<Resource> {
        resources::COLLECTIONS
            .iter()
            .map(|info| {
                let mut resource = RawResource::new(info.uri, info.name);
                resource.description = Some(info.description.to_string());
                resource.mime_type = Some(resources::MIME_TYPE.to_string());
                resource.no_annotation()
            })
            .collect()
    }

    fn instructions(&self) -> String {
        format!(
            "Manage a Listmonk newsletter server at {}: subscribers, mailing lists, \
             campaigns, templates and transactional email. Resources: {}. \
             Single entities can be read at {}.",
            self.client.base_url(),
            resources::COLLECTIONS
                .iter()
                .map(|r| r.uri)
                .collect::<Vec<_>>()
                .join(", "),
            resources::ENTITY_URI_FORMS.join(", ")
        )
    }

    /// Run one tool.
    ///
    /// Unknown tools are a protocol error; every Listmonk failure becomes a
    /// tool result with `isError` set and a structured error payload.
    pub async fn call(
        &self,
        name: &str,
        args: Value,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        debug!(tool = name, "Tool call");
        match tools::dispatch(&self.client, name, args).await {
            None => {
                warn!(tool = name, "Unknown tool requested");
                Err(ErrorData::invalid_params(
                    format!("unknown tool: {}", name),
                    None,
                ))
            }
            Some(Ok(output)) => {
                info!(tool = name, "{}", output.message);
                Ok(CallToolResult::structured(output.to_json()))
            }
            Some(Err(err)) => {
                warn!(tool = name, kind = %err.kind(), error = %err, "Tool call failed");
                Ok(CallToolResult::structured_error(tools::failure_json(&err)))
            }
        }
    }

    /// Read one resource as markdown.
    pub async fn read(&self, uri: &str) -> std::result::Result<ReadResourceResult, ErrorData> {
        debug!(uri, "Resource read");
        let result = match uri.parse::<ResourceUri>() {
            Ok(parsed) => resources::read(&self.client, &parsed).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(text) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(text, uri)],
            }),
            Err(err) => {
                warn!(uri, kind = %err.kind(), error = %err, "Resource read failed");
                Err(resource_error(&err))
            }
        }
    }
}

/// Map a failed resource read onto an MCP protocol error.
fn resource_error(err: &ListmonkError) -> ErrorData {
    let data = Some(err.to_json());
    match err.kind() {
        ErrorKind::NotFound => ErrorData::resource_not_found(err.to_string(), data),
        ErrorKind::Validation => ErrorData::invalid_params(err.to_string(), data),
        _ => ErrorData::internal_error(err.to_string(), data),
    }
}

impl ServerHandler for ListmonkBridge {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.server_name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(self.instructions()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_definitions()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let args = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        self.call(&request.name, args).await
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult::with_all_items(
            self.resource_definitions(),
        ))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, ErrorData> {
        self.read(&request.uri).await
    }
}

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn run_stdio(bridge: ListmonkBridge) -> Result<()> {
    use rmcp::serve_server;

    if is_terminal::is_terminal(std::io::stdout()) {
        warn!(
            "stdout is a terminal; this server speaks MCP over stdio and is meant to be \
             launched by an MCP client"
        );
    }

    info!(
        server = bridge.server_name(),
        url = bridge.client().base_url(),
        "Starting MCP server on stdio"
    );

    let server = serve_server(bridge, (stdin(), stdout()))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start MCP server: {}", e))?;

    let reason = server.waiting().await?;
    info!(?reason, "MCP session ended");
    Ok(())
}
