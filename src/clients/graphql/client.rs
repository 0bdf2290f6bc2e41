//! GraphQL client implementation.
//!
//! This module provides the [`GraphqlClient`] type, the single entry point
//! through which every console operation reaches the server.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::TokenProvider;
use crate::clients::graphql::{GraphqlError, GraphqlResponse, GraphqlResponseError};
use crate::clients::multipart::MultipartEnvelope;
use crate::clients::{HttpClient, HttpError, RequestBody, Variables};
use crate::config::ConsoleConfig;

/// GraphQL client for the admin console API.
///
/// Each call sends exactly one POST to the configured endpoint:
///
/// - Without files, the body is `{"query", "variables"}` as
///   `application/json`.
/// - With at least one [`FileUpload`](crate::clients::FileUpload) among the
///   top-level variables, the body is a multipart form following the
///   GraphQL multipart request convention.
///
/// The bearer token is read from the [`TokenProvider`] on every call.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use charity_admin::{ConsoleConfig, GraphqlClient, SessionStore};
/// use charity_admin::clients::{FileUpload, Variables};
/// use serde_json::json;
///
/// let session = Arc::new(SessionStore::new());
/// let client = GraphqlClient::new(&ConsoleConfig::from_env()?, session.clone());
///
/// // Plain JSON request
/// let data = client.query("query { getCategories { id title } }").await?;
///
/// // File upload
/// let variables = Variables::new()
///     .with("categoryId", json!(2))
///     .with("description", json!("School supplies"))
///     .with("file", FileUpload::new("banner.jpg", bytes));
/// let data = client.execute(CREATE_DONATION, &variables).await?;
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a client that reads its bearer token from `token_provider`.
    ///
    /// This constructor is infallible; configuration was validated when the
    /// [`ConsoleConfig`] was built.
    #[must_use]
    pub fn new(config: &ConsoleConfig, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            http_client: HttpClient::new(config, token_provider),
        }
    }

    /// Creates a client that never sends an `Authorization` header.
    #[must_use]
    pub fn anonymous(config: &ConsoleConfig) -> Self {
        Self::new(config, Arc::new(()))
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Executes a document that takes no variables.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn query(&self, query: &str) -> Result<Value, GraphqlError> {
        self.execute(query, &Variables::new()).await
    }

    /// Executes a GraphQL operation and returns its `data` object.
    ///
    /// `variables` is only borrowed and never modified. A missing `data`
    /// field comes back as `Value::Null`.
    ///
    /// The HTTP status does not decide the outcome: a JSON body without
    /// errors yields its `data` even under a 4xx or 5xx status.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Graphql`] if the response has a non-empty `errors`
    ///   array; its message is the first error's message, unchanged
    /// - [`GraphqlError::Http`] for network failures, non-JSON responses and
    ///   undecodable JSON
    /// - [`GraphqlError::Decode`] if the JSON body is not an object
    pub async fn execute(&self, query: &str, variables: &Variables) -> Result<Value, GraphqlError> {
        let body = Self::encode(query, variables)?;
        let response = self.http_client.post(body).await?;

        let code = response.code;
        let is_ok = response.is_ok();

        let envelope: GraphqlResponse = serde_json::from_value(response.body).map_err(
            |source| GraphqlError::Decode {
                context: "response envelope".to_string(),
                source,
            },
        )?;

        if envelope.has_errors() {
            let error =
                GraphqlResponseError::new(envelope.errors.unwrap_or_default(), envelope.data);
            tracing::warn!(
                "GraphQL request failed ({:?}): {}",
                error.kind,
                error.message
            );
            return Err(error.into());
        }

        if !is_ok {
            tracing::warn!("HTTP {} response carried no GraphQL errors; returning its data", code);
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }

    /// Executes an operation and decodes `data.<field>` into `T`.
    ///
    /// A missing or `null` field is decoded from `null`, so `Option<T>`
    /// targets accept it and others fail with [`GraphqlError::Decode`].
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus
    /// [`GraphqlError::Decode`] when the field has an unexpected shape.
    pub async fn execute_field<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: &Variables,
        field: &str,
    ) -> Result<T, GraphqlError> {
        let mut data = self.execute(query, variables).await?;
        let value = data
            .get_mut(field)
            .map(Value::take)
            .unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|source| GraphqlError::Decode {
            context: field.to_string(),
            source,
        })
    }

    /// Picks the wire format for `variables` and builds the body.
    fn encode(query: &str, variables: &Variables) -> Result<RequestBody, HttpError> {
        if !variables.has_files() {
            return Ok(RequestBody::Json(serde_json::json!({
                "query": query,
                "variables": variables.to_json(),
            })));
        }

        let envelope = MultipartEnvelope::new(query, variables);
        tracing::debug!("Encoding {} file(s) as multipart upload", envelope.files().len());
        Ok(RequestBody::Multipart(envelope.into_form()?))
    }
}
