//! Unit tests for configuration through the public facade

use std::collections::HashMap;
use std::time::Duration;

use listmonk_mcp::core::config::{ENV_PASSWORD, ENV_URL, ENV_USERNAME};
use listmonk_mcp::core::ConfigError;
use listmonk_mcp::{ListmonkConfig, LogLevel};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_minimal_configuration() {
    let config = ListmonkConfig::from_lookup(lookup(&[
        (ENV_URL, "https://lists.example.com///"),
        (ENV_USERNAME, "api"),
        (ENV_PASSWORD, "token"),
    ]))
    .unwrap();

    assert_eq!(config.url, "https://lists.example.com");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_error_messages_name_the_variable() {
    let err = ListmonkConfig::from_lookup(lookup(&[
        (ENV_URL, "https://lists.example.com"),
        (ENV_USERNAME, "api"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains(ENV_PASSWORD));

    let err = ListmonkConfig::from_lookup(lookup(&[
        (ENV_URL, "ftp://lists.example.com"),
        (ENV_USERNAME, "api"),
        (ENV_PASSWORD, "token"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidScheme(_)));
}

#[test]
fn test_token_never_printed() {
    let config = ListmonkConfig::builder()
        .url("http://localhost:9000")
        .username("api")
        .api_token("very-secret")
        .build()
        .unwrap();
    assert!(!format!("{:?}", config).contains("very-secret"));
}
