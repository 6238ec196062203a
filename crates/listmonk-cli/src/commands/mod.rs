use anyhow::{Context, Result};
use clap::Args;
use listmonk_core::config::{
    ENV_MAX_RETRIES, ENV_PASSWORD, ENV_SERVER_NAME, ENV_TIMEOUT, ENV_URL, ENV_USERNAME,
};
use listmonk_core::ListmonkConfig;

pub(crate) mod check;
pub(crate) mod serve;
pub(crate) mod tools;

/// Connection settings that override the environment.
///
/// The API token is deliberately environment-only so it never shows up in
/// process listings.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Listmonk base URL (overrides LISTMONK_MCP_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Listmonk API user (overrides LISTMONK_MCP_USERNAME)
    #[arg(long, global = true, value_name = "USER")]
    pub username: Option<String>,

    /// Request timeout in seconds (overrides LISTMONK_MCP_TIMEOUT)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Retries for failed read requests (overrides LISTMONK_MCP_MAX_RETRIES)
    #[arg(long, global = true, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Server name reported to MCP clients (overrides LISTMONK_MCP_SERVER_NAME)
    #[arg(long, global = true, value_name = "NAME")]
    pub server_name: Option<String>,
}

impl ConnectionArgs {
    fn override_for(&self, key: &str) -> Option<String> {
        match key {
            ENV_URL => self.url.clone(),
            ENV_USERNAME => self.username.clone(),
            ENV_TIMEOUT => self.timeout.map(|t| t.to_string()),
            ENV_MAX_RETRIES => self.max_retries.map(|r| r.to_string()),
            ENV_SERVER_NAME => self.server_name.clone(),
            _ => None,
        }
    }

    /// Resolve configuration with `lookup` as the fallback for anything not
    /// given on the command line.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ListmonkConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        ListmonkConfig::from_lookup(|key| self.override_for(key).or_else(|| lookup(key)))
            .with_context(|| {
                format!(
                    "Invalid Listmonk configuration (set {}, {} and {})",
                    ENV_URL, ENV_USERNAME, ENV_PASSWORD
                )
            })
    }

    /// Resolve configuration against the process environment
    pub fn resolve(&self) -> Result<ListmonkConfig> {
        self.resolve_with(|key| std::env::var(key).ok())
    }
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Start even if Listmonk cannot be reached
    #[arg(long)]
    pub skip_health_check: bool,
}

#[derive(Args, Debug, Default)]
pub struct ToolsArgs {
    /// Print only tool names, one per line
    #[arg(long)]
    pub names: bool,
}
