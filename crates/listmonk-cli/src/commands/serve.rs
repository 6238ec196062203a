use anyhow::Result;
use listmonk_bridge::BridgeBuilder;
use tracing::{debug, info};

use super::ServeArgs;
use crate::Cli;

pub async fn execute(args: &ServeArgs, cli: &Cli) -> Result<()> {
    let config = cli.connection.resolve()?;
    debug!(?config, "Resolved configuration");

    let bridge = BridgeBuilder::new()
        .config(config)
        .with_health_check(!args.skip_health_check)
        .build()?;

    info!(
        server = %bridge.service().server_name(),
        url = %bridge.service().client().base_url(),
        "Starting Listmonk MCP server on stdio"
    );
    bridge.start().await?;

    info!("MCP client disconnected, shutting down");
    Ok(())
}
