//! GraphQL API client for the admin console.
//!
//! This module provides the transport every console screen goes through.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: Executes operations, choosing JSON or multipart encoding
//! - [`GraphqlError`]: Error type with a structured [`GraphqlErrorKind`]
//! - [`GraphqlResponse`]: The decoded `{data, errors, extensions}` envelope
//!
//! # Response Handling
//!
//! A response is only parsed when its `Content-Type` is a JSON media type.
//! A non-empty `errors` array fails the call with the first error's message;
//! otherwise the `data` object is returned.
//!
//! # Retry Behavior
//!
//! None. A failed call surfaces directly to the caller.

mod client;
mod errors;
mod response;

pub use client::GraphqlClient;
pub use errors::{
    ErrorLocation, GraphqlError, GraphqlErrorEntry, GraphqlErrorKind, GraphqlResponseError,
};
pub use response::GraphqlResponse;
