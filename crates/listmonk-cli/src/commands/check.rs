use anyhow::{bail, Result};
use listmonk_bridge::ListmonkClient;
use serde_json::json;
use tracing::error;

use crate::Cli;

/// Probe `/api/health` and print the outcome as JSON on stdout.
pub async fn execute(cli: &Cli) -> Result<()> {
    let config = cli.connection.resolve()?;
    let client = ListmonkClient::new(&config)?;

    let (healthy, detail) = match client.health_check().await {
        Ok(true) => (true, None),
        Ok(false) => (false, Some("Listmonk reported an unhealthy state".to_string())),
        Err(e) => (false, Some(e.to_string())),
    };

    let report = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "server_url": client.base_url(),
        "error": detail,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !healthy {
        error!(url = %client.base_url(), "Listmonk health check failed");
        bail!("Listmonk at {} is not healthy", client.base_url());
    }
    Ok(())
}
