//! Core types for the Listmonk MCP bridge
//!
//! Configuration, the error taxonomy, Listmonk data models, tool input
//! parameters and the local validation applied to them. Nothing in this
//! crate performs I/O beyond reading the environment.

pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod schema;
pub mod validation;

pub use config::{ListmonkConfig, ListmonkConfigBuilder, LogLevel};
pub use error::{ConfigError, ErrorKind, ListmonkError, Result};
pub use models::{
    Campaign, CampaignStatus, Envelope, MailingList, Page, Subscriber, SubscriberStatus,
    Template,
};
pub use params::ToolParams;
pub use schema::ToolSchema;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        config::{ListmonkConfig, ListmonkConfigBuilder, LogLevel},
        error::{ConfigError, ErrorKind, ListmonkError, Result},
        models::*,
        params::*,
        schema::ToolSchema,
    };
}
