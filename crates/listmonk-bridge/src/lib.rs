//! # Listmonk Bridge
//!
//! MCP-to-Listmonk bridge: exposes a Listmonk newsletter server's REST API as
//! Model Context Protocol tools and resources.
//!
//! ## Features
//!
//! - **RMCP Protocol Support**: tools and resources served over stdio with rmcp
//! - **Token Authentication**: `Authorization: token <user>:<token>` on every request
//! - **Local Validation**: invalid tool input is rejected before any network call
//! - **Typed Errors**: remote failures mapped to a stable error taxonomy
//!
//! ## Quick Start
//!
//! ```no_run
//! use listmonk_bridge::start_bridge;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Reads LISTMONK_MCP_URL, LISTMONK_MCP_USERNAME and LISTMONK_MCP_PASSWORD
//!     start_bridge().await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod builder;
pub mod client;
pub mod resources;
pub mod rmcp_server;
pub mod tools;

// Re-export main types for convenience
pub use builder::{Bridge, BridgeBuilder};
pub use client::ListmonkClient;
pub use resources::ResourceUri;
pub use rmcp_server::{run_stdio, ListmonkBridge};
pub use tools::{ToolDefinition, ToolOutput};

use anyhow::Result;
use listmonk_core::ListmonkConfig;

/// Start a bridge configured from the environment.
///
/// Runs the startup health check, then serves MCP over stdio.
pub async fn start_bridge() -> Result<()> {
    let config = ListmonkConfig::from_env()?;
    BridgeBuilder::new().config(config).build()?.start().await
}
