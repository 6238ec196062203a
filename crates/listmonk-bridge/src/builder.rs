//! Builder pattern for creating and configuring the MCP bridge

use anyhow::{Context, Result};
use listmonk_core::ListmonkConfig;
use tracing::info;

use crate::rmcp_server::{run_stdio, ListmonkBridge};

/// Builder for creating MCP bridge configurations
///
/// # Example
///
/// ```no_run
/// use listmonk_bridge::BridgeBuilder;
/// use listmonk_core::ListmonkConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let bridge = BridgeBuilder::new()
///         .config(ListmonkConfig::from_env()?)
///         .with_health_check(true)
///         .build()?;
///
///     bridge.start().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BridgeBuilder {
    config: Option<ListmonkConfig>,
    health_check: bool,
}

impl Default for BridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeBuilder {
    /// Create a new bridge builder with default settings
    pub fn new() -> Self {
        Self {
            config: None,
            health_check: true,
        }
    }

    /// Set the Listmonk configuration
    pub fn config(mut self, config: ListmonkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Enable or disable the startup health check
    ///
    /// When enabled, [`Bridge::start`] refuses to serve if Listmonk cannot be
    /// reached with the configured credentials.
    pub fn with_health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    /// Build the bridge and its HTTP client
    pub fn build(self) -> Result<Bridge> {
        let config = self
            .config
            .context("Listmonk configuration is required")?;
        let service = ListmonkBridge::from_config(&config)?;

        Ok(Bridge {
            service,
            health_check: self.health_check,
        })
    }
}

/// A configured MCP bridge ready to start
#[derive(Debug, Clone)]
pub struct Bridge {
    service: ListmonkBridge,
    health_check: bool,
}

impl Bridge {
    /// Check that Listmonk is reachable and reports itself healthy
    pub async fn check_health(&self) -> Result<()> {
        let url = self.service.client().base_url().to_string();
        let healthy = self
            .service
            .client()
            .health_check()
            .await
            .with_context(|| format!("Listmonk health check against {} failed", url))?;
        if !healthy {
            anyhow::bail!("Listmonk at {} reports an unhealthy state", url);
        }
        info!(url = %url, "Listmonk is healthy");
        Ok(())
    }

    /// Start the bridge and serve MCP over stdio
    ///
    /// Runs until the MCP client disconnects.
    pub async fn start(self) -> Result<()> {
        if self.health_check {
            self.check_health().await?;
        }
        run_stdio(self.service).await
    }

    /// The MCP service behind this bridge
    pub fn service(&self) -> &ListmonkBridge {
        &self.service
    }

    /// Check if the startup health check is enabled
    pub fn is_health_checked(&self) -> bool {
        self.health_check
    }
}
