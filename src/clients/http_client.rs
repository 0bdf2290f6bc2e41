//! HTTP client for the console's GraphQL endpoint.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! POST requests and classifying their responses.

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::TokenProvider;
use crate::clients::errors::{HttpError, NonJsonResponseError};
use crate::clients::http_request::RequestBody;
use crate::clients::http_response::{is_json_content_type, HttpResponse};
use crate::config::{ConsoleConfig, GraphqlEndpoint};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the GraphQL endpoint.
///
/// The client handles:
/// - Default headers including User-Agent and Accept
/// - The `Authorization` header, read from the token provider per request
/// - Refusing to parse non-JSON responses
///
/// There is no retry, timeout or cancellation: one call sends exactly one
/// request and reports whatever happened.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The endpoint every request is posted to.
    endpoint: GraphqlEndpoint,
    /// Headers included in every request.
    default_headers: HashMap<String, String>,
    /// Source of the bearer token.
    token_provider: Arc<dyn TokenProvider>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint and user agent settings
    /// * `token_provider` - Consulted for a bearer token on every request
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &ConsoleConfig, token_provider: Arc<dyn TokenProvider>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Charity Admin API v{SDK_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.endpoint().clone(),
            default_headers,
            token_provider,
        }
    }

    /// Returns the endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &GraphqlEndpoint {
        &self.endpoint
    }

    /// Returns the headers included in every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the headers for the next request.
    ///
    /// This is the default headers plus `Authorization: Bearer <token>` when
    /// the provider currently holds a token. `Content-Type` is added later
    /// and only for JSON bodies.
    #[must_use]
    pub fn request_headers(&self) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();
        if let Some(token) = self.token_provider.bearer_token() {
            headers.insert("Authorization".to_string(), token.authorization_value());
        }
        headers
    }

    /// Posts `body` to the endpoint and decodes the JSON response.
    ///
    /// Any status code is returned as long as the body is JSON; deciding
    /// what a 4xx or 5xx means is left to the GraphQL layer, because servers
    /// report GraphQL errors with those codes too.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - A network error occurs (`Network`)
    /// - The response is not JSON (`NonJson`)
    /// - A JSON response does not decode (`InvalidJson`)
    pub async fn post(&self, body: RequestBody) -> Result<HttpResponse, HttpError> {
        let wire_format = body.wire_format();
        let mut headers = self.request_headers();
        if let Some(content_type) = body.explicit_content_type() {
            headers.insert("Content-Type".to_string(), content_type.to_string());
        }

        let mut req_builder = self.client.post(self.endpoint.as_ref());
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = match body {
            RequestBody::Json(json) => req_builder.body(json.to_string()),
            RequestBody::Multipart(form) => req_builder.multipart(form),
        };

        tracing::debug!(
            "Posting {} request to {} (authenticated: {})",
            wire_format,
            self.endpoint,
            headers.contains_key("Authorization")
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let content_type = res_headers
            .get("content-type")
            .and_then(|values| values.first())
            .cloned();
        let body_text = res.text().await?;

        if !content_type.as_deref().is_some_and(is_json_content_type) {
            let error = NonJsonResponseError::new(code, content_type, &body_text);
            tracing::warn!(
                "Server returned non-JSON response (HTTP {}, {}): {}",
                code,
                error.describe_content_type(),
                error.body_prefix
            );
            return Err(error.into());
        }

        let body = serde_json::from_str(&body_text)
            .map_err(|source| HttpError::InvalidJson { code, source })?;

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
