//! HTTP and GraphQL client types for the admin console API.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: Executes GraphQL operations against the console API
//! - [`Variables`], [`VariableValue`], [`FileUpload`]: Operation variables,
//!   tagged so file uploads are explicit
//! - [`MultipartEnvelope`]: The `operations` / `map` / files triple of an upload
//! - [`HttpClient`]: The authenticated POST layer underneath
//! - [`HttpError`] and [`GraphqlError`]: What can go wrong
//!
//! # Example
//!
//! ```rust,ignore
//! use charity_admin::clients::{GraphqlClient, Variables};
//! use charity_admin::ConsoleConfig;
//! use serde_json::json;
//!
//! let client = GraphqlClient::anonymous(&ConsoleConfig::default());
//! let variables = Variables::new().with("title", json!("Education"));
//! let data = client
//!     .execute("mutation CreateCategory($title: String!) { createCategory(title: $title) { id } }", &variables)
//!     .await?;
//! ```

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;
mod multipart;
mod variables;

pub use errors::{
    HttpError, MultipartError, NonJsonResponseError, BODY_PREFIX_CHARS,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{RequestBody, WireFormat};
pub use http_response::{is_json_content_type, HttpResponse};
pub use multipart::{FileMap, MultipartEnvelope};
pub use variables::{FileUpload, ListItem, VariableValue, Variables};

pub use graphql::{GraphqlClient, GraphqlError, GraphqlErrorKind};
