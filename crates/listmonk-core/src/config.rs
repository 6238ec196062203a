//! Configuration for the Listmonk MCP server
//!
//! Settings come from `LISTMONK_MCP_*` environment variables (optionally
//! loaded from a `.env` file) or are assembled with [`ListmonkConfigBuilder`].
//! Validation happens once, at startup.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const ENV_URL: &str = "LISTMONK_MCP_URL";
pub const ENV_USERNAME: &str = "LISTMONK_MCP_USERNAME";
/// Holds the API token. The name is kept for compatibility with existing setups.
pub const ENV_PASSWORD: &str = "LISTMONK_MCP_PASSWORD";
pub const ENV_TIMEOUT: &str = "LISTMONK_MCP_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "LISTMONK_MCP_MAX_RETRIES";
pub const ENV_DEBUG: &str = "LISTMONK_MCP_DEBUG";
pub const ENV_LOG_LEVEL: &str = "LISTMONK_MCP_LOG_LEVEL";
pub const ENV_SERVER_NAME: &str = "LISTMONK_MCP_SERVER_NAME";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SERVER_NAME: &str = "Listmonk MCP Server";

/// Log verbosity accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

/// Validated configuration shared read-only by every invocation.
#[derive(Clone)]
pub struct ListmonkConfig {
    /// Base URL of the Listmonk server, without trailing slash
    pub url: String,
    /// API user name
    pub username: String,
    api_token: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts for GET requests that fail at the transport level
    pub max_retries: u32,
    pub debug: bool,
    pub log_level: LogLevel,
    /// Name reported to MCP clients
    pub server_name: String,
}

impl fmt::Debug for ListmonkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListmonkConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("debug", &self.debug)
            .field("log_level", &self.log_level)
            .field("server_name", &self.server_name)
            .finish()
    }
}

impl ListmonkConfig {
    pub fn builder() -> ListmonkConfigBuilder {
        ListmonkConfigBuilder::new()
    }

    /// The API token sent in the `Authorization` header.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ListmonkConfigBuilder::new();

        if let Some(url) = lookup(ENV_URL) {
            builder = builder.url(url);
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            builder = builder.username(username);
        }
        if let Some(token) = lookup(ENV_PASSWORD) {
            builder = builder.api_token(token);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs = parse_number::<u64>(ENV_TIMEOUT, &raw)?;
            builder = builder.timeout_secs(secs);
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            builder = builder.max_retries(parse_number::<u32>(ENV_MAX_RETRIES, &raw)?);
        }
        if let Some(raw) = lookup(ENV_DEBUG) {
            builder = builder.debug(parse_bool(ENV_DEBUG, &raw)?);
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            builder = builder.log_level(raw.parse()?);
        }
        if let Some(name) = lookup(ENV_SERVER_NAME) {
            builder = builder.server_name(name);
        }

        builder.build()
    }

    /// Load variables from a `.env` file into the process environment.
    ///
    /// Variables already set in the environment take precedence.
    pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
        dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

fn parse_number<T: FromStr>(env: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        env,
        value: raw.to_string(),
    })
}

/// Parse a boolean switch such as `LISTMONK_MCP_DEBUG`.
pub fn parse_bool(env: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            env,
            value: raw.to_string(),
        }),
    }
}

/// Builder for [`ListmonkConfig`] with validation
#[derive(Debug, Clone)]
pub struct ListmonkConfigBuilder {
    url: Option<String>,
    username: Option<String>,
    api_token: Option<String>,
    timeout: Duration,
    max_retries: u32,
    debug: bool,
    log_level: LogLevel,
    server_name: String,
}

impl Default for ListmonkConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ListmonkConfigBuilder {
    pub fn new() -> Self {
        Self {
            url: None,
            username: None,
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: 0,
            debug: false,
            log_level: LogLevel::default(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the API token (the `LISTMONK_MCP_PASSWORD` value)
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout_secs(self, secs: u64) -> Self {
        self.timeout(Duration::from_secs(secs))
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ListmonkConfig, ConfigError> {
        let url = self
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing {
                name: "Listmonk URL",
                env: ENV_URL,
            })?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidScheme(url));
        }
        let url = url.trim_end_matches('/').to_string();
        url::Url::parse(&url).map_err(|e| ConfigError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let username = self
            .username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing {
                name: "Listmonk username",
                env: ENV_USERNAME,
            })?;

        let api_token = self
            .api_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing {
                name: "Listmonk API token",
                env: ENV_PASSWORD,
            })?;

        let header_safe = |s: &str| s.chars().all(|c| c.is_ascii_graphic());
        if !header_safe(&username) || !header_safe(&api_token) || username.contains(':') {
            return Err(ConfigError::InvalidCredentials);
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(self.timeout.as_secs()));
        }

        let server_name = if self.server_name.trim().is_empty() {
            DEFAULT_SERVER_NAME.to_string()
        } else {
            self.server_name
        };

        Ok(ListmonkConfig {
            url,
            username,
            api_token,
            timeout: self.timeout,
            max_retries: self.max_retries,
            debug: self.debug,
            log_level: self.log_level,
            server_name,
        })
    }
}
