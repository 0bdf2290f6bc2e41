//! HTTP response types for the admin console client.
//!
//! This module provides the [`HttpResponse`] type for accessing a decoded
//! JSON response, plus the media-type check that decides whether a body may
//! be parsed at all.

use std::collections::HashMap;

/// Returns `true` if `content_type` names a JSON media type.
///
/// Accepts `application/json` and any `+json` structured suffix (such as
/// `application/graphql-response+json`), ignoring parameters and case.
///
/// # Example
///
/// ```rust
/// use charity_admin::clients::is_json_content_type;
///
/// assert!(is_json_content_type("application/json; charset=utf-8"));
/// assert!(is_json_content_type("application/graphql-response+json"));
/// assert!(!is_json_content_type("text/html"));
/// ```
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// A decoded JSON response.
///
/// Responses that are not JSON never become an `HttpResponse`; they fail
/// earlier with [`NonJsonResponseError`](crate::clients::NonJsonResponseError).
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded JSON body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the first value of header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}
