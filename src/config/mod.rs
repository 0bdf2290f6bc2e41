//! Configuration types for the admin console client.
//!
//! # Overview
//!
//! - [`ConsoleConfig`]: The configuration struct holding all client settings
//! - [`ConsoleConfigBuilder`]: A builder for constructing [`ConsoleConfig`] instances
//! - [`GraphqlEndpoint`]: The validated GraphQL endpoint URL
//! - [`UploadsBaseUrl`]: The validated base URL for uploaded media
//!
//! Configuration is read once at startup and never re-read per request.
//!
//! # Example
//!
//! ```rust
//! use charity_admin::{ConsoleConfig, GraphqlEndpoint};
//!
//! let config = ConsoleConfig::builder()
//!     .endpoint(GraphqlEndpoint::new("https://api.example.org/graphql").unwrap())
//!     .user_agent_prefix("AdminConsole/2.1")
//!     .build();
//!
//! assert_eq!(config.endpoint().host_name(), "api.example.org");
//! ```

mod newtypes;

pub use newtypes::{GraphqlEndpoint, UploadsBaseUrl, POST_UPLOADS_PATH};

use crate::error::ConfigError;

/// Environment variable holding the GraphQL endpoint.
pub const ENDPOINT_ENV: &str = "GRAPHQL_ENDPOINT";

/// Environment variable holding the uploads base URL.
pub const UPLOADS_BASE_ENV: &str = "UPLOADS_BASE_URL";

/// Environment variable holding the user agent prefix.
pub const USER_AGENT_PREFIX_ENV: &str = "CONSOLE_USER_AGENT_PREFIX";

/// Configuration for the admin console client.
///
/// # Thread Safety
///
/// `ConsoleConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug, Default)]
pub struct ConsoleConfig {
    endpoint: GraphqlEndpoint,
    uploads_base: UploadsBaseUrl,
    user_agent_prefix: Option<String>,
}

impl ConsoleConfig {
    /// Creates a new builder for constructing a `ConsoleConfig`.
    #[must_use]
    pub fn builder() -> ConsoleConfigBuilder {
        ConsoleConfigBuilder::new()
    }

    /// Loads configuration from process environment variables.
    ///
    /// Reads [`ENDPOINT_ENV`], [`UPLOADS_BASE_ENV`] and
    /// [`USER_AGENT_PREFIX_ENV`]. Unset or empty variables fall back to the
    /// local development defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a set variable holds an invalid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// This is what [`from_env`](Self::from_env) uses under the hood; pass a
    /// closure over a map to load configuration from somewhere else.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a present value holds an invalid URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use charity_admin::ConsoleConfig;
    ///
    /// let config = ConsoleConfig::from_lookup(|key| match key {
    ///     "GRAPHQL_ENDPOINT" => Some("https://api.example.org/graphql".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.endpoint().as_ref(), "https://api.example.org/graphql");
    /// assert_eq!(config.uploads_base().as_ref(), "http://localhost:4000");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut builder = ConsoleConfigBuilder::new();
        if let Some(url) = present(ENDPOINT_ENV) {
            builder = builder.endpoint(GraphqlEndpoint::new(url)?);
        }
        if let Some(url) = present(UPLOADS_BASE_ENV) {
            builder = builder.uploads_base(UploadsBaseUrl::new(url)?);
        }
        if let Some(prefix) = present(USER_AGENT_PREFIX_ENV) {
            builder = builder.user_agent_prefix(prefix);
        }

        let config = builder.build();
        tracing::debug!(
            "Loaded console configuration: endpoint {}, uploads base {}",
            config.endpoint,
            config.uploads_base.as_ref()
        );
        Ok(config)
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &GraphqlEndpoint {
        &self.endpoint
    }

    /// Returns the uploads base URL.
    #[must_use]
    pub const fn uploads_base(&self) -> &UploadsBaseUrl {
        &self.uploads_base
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ConsoleConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConsoleConfig>();
};

/// Builder for constructing [`ConsoleConfig`] instances.
///
/// # Defaults
///
/// - `endpoint`: [`GraphqlEndpoint::DEFAULT`]
/// - `uploads_base`: [`UploadsBaseUrl::DEFAULT`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ConsoleConfigBuilder {
    endpoint: Option<GraphqlEndpoint>,
    uploads_base: Option<UploadsBaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ConsoleConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: GraphqlEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the uploads base URL.
    #[must_use]
    pub fn uploads_base(mut self, uploads_base: UploadsBaseUrl) -> Self {
        self.uploads_base = Some(uploads_base);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ConsoleConfig`].
    ///
    /// Every field has a default, so building never fails; validation
    /// happens when the newtypes are constructed.
    #[must_use]
    pub fn build(self) -> ConsoleConfig {
        ConsoleConfig {
            endpoint: self.endpoint.unwrap_or_default(),
            uploads_base: self.uploads_base.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_builder_defaults_to_local_server() {
        let config = ConsoleConfig::builder().build();

        assert_eq!(config.endpoint().as_ref(), "http://localhost:4000/graphql");
        assert_eq!(config.uploads_base().as_ref(), "http://localhost:4000");
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let config = ConsoleConfig::builder()
            .endpoint(GraphqlEndpoint::new("https://api.example.org/graphql").unwrap())
            .uploads_base(UploadsBaseUrl::new("https://cdn.example.org").unwrap())
            .user_agent_prefix("Console/1.0")
            .build();

        assert_eq!(config.endpoint().host_name(), "api.example.org");
        assert_eq!(config.uploads_base().as_ref(), "https://cdn.example.org");
        assert_eq!(config.user_agent_prefix(), Some("Console/1.0"));
    }

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[
            (ENDPOINT_ENV, "https://api.example.org/graphql"),
            (UPLOADS_BASE_ENV, "https://cdn.example.org/"),
            (USER_AGENT_PREFIX_ENV, "Console/3.0"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint().as_ref(), "https://api.example.org/graphql");
        assert_eq!(config.uploads_base().as_ref(), "https://cdn.example.org");
        assert_eq!(config.user_agent_prefix(), Some("Console/3.0"));
    }

    #[test]
    fn test_from_lookup_ignores_blank_values() {
        let config =
            ConsoleConfig::from_lookup(lookup_from(&[(ENDPOINT_ENV, "   ")])).unwrap();
        assert_eq!(config.endpoint(), &GraphqlEndpoint::default());
    }

    #[test]
    fn test_from_lookup_rejects_invalid_endpoint() {
        let result = ConsoleConfig::from_lookup(lookup_from(&[(ENDPOINT_ENV, "nope")]));
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_config_is_clone_send_sync() {
        fn assert_traits<T: Clone + Send + Sync>() {}
        assert_traits::<ConsoleConfig>();
    }
}
