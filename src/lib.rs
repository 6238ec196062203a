//! # Listmonk MCP
//!
//! Expose a [Listmonk](https://listmonk.app) newsletter server as Model
//! Context Protocol tools and resources.
//!
//! ## Overview
//!
//! The workspace is split in two:
//! - **listmonk-core**: configuration, error taxonomy, data models and tool
//!   input validation
//! - **listmonk-bridge**: the Listmonk HTTP client and the rmcp server that
//!   serves tools and resources over stdio
//!
//! ## Quick Start
//!
//! ```no_run
//! use listmonk_mcp::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ListmonkConfig::from_env()?;
//!     BridgeBuilder::new().config(config).build()?.start().await
//! }
//! ```

// Re-export core functionality
pub use listmonk_core as core;

// Re-export the MCP bridge
#[cfg(feature = "bridge")]
pub use listmonk_bridge as bridge;

pub use listmonk_core::{ErrorKind, ListmonkConfig, ListmonkError, LogLevel};

#[cfg(feature = "bridge")]
pub use listmonk_bridge::{start_bridge, BridgeBuilder, ListmonkBridge, ListmonkClient};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::prelude::*;

    #[cfg(feature = "bridge")]
    pub use crate::bridge::{Bridge, BridgeBuilder, ListmonkBridge, ListmonkClient, ResourceUri};
}
