//! Integration tests for configuration loading.

use std::collections::HashMap;

use charity_admin::config::{ENDPOINT_ENV, UPLOADS_BASE_ENV, USER_AGENT_PREFIX_ENV};
use charity_admin::{ConfigError, ConsoleConfig, GraphqlEndpoint, UploadsBaseUrl};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_point_at_local_server() {
    let config = ConsoleConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.endpoint().as_ref(), GraphqlEndpoint::DEFAULT);
    assert_eq!(config.uploads_base().as_ref(), UploadsBaseUrl::DEFAULT);
    assert!(config.user_agent_prefix().is_none());
}

#[test]
fn test_all_values_are_read() {
    let config = ConsoleConfig::from_lookup(lookup(&[
        (ENDPOINT_ENV, "https://api.example.org/graphql"),
        (UPLOADS_BASE_ENV, "https://cdn.example.org"),
        (USER_AGENT_PREFIX_ENV, "Console/1.0"),
    ]))
    .unwrap();

    assert_eq!(config.endpoint().host_name(), "api.example.org");
    assert_eq!(config.uploads_base().as_ref(), "https://cdn.example.org");
    assert_eq!(config.user_agent_prefix(), Some("Console/1.0"));
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config = ConsoleConfig::from_lookup(lookup(&[(ENDPOINT_ENV, "  ")])).unwrap();
    assert_eq!(config.endpoint().as_ref(), GraphqlEndpoint::DEFAULT);
}

#[test]
fn test_invalid_endpoint_is_rejected() {
    let result = ConsoleConfig::from_lookup(lookup(&[(ENDPOINT_ENV, "ftp://example.org")]));
    assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
}

#[test]
fn test_config_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConsoleConfig>();
}
