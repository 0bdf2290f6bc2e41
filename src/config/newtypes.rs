//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around URL strings that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// Path segment under which post images are served.
pub const POST_UPLOADS_PATH: &str = "/uploads/posts";

/// Byte offsets of the scheme and host inside a validated URL string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct UrlParts {
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

/// Splits `url` into scheme and host, accepting only `http` and `https`.
fn split_http_url(url: &str) -> Option<UrlParts> {
    let scheme_end = url.find("://")?;

    let scheme = &url[..scheme_end];
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return None;
    }

    let host_start = scheme_end + 3;
    if host_start >= url.len() {
        return None;
    }

    // Host ends at port, path, query, or end of string
    let remainder = &url[host_start..];
    let host_end = remainder
        .find([':', '/', '?', '#'])
        .map_or(url.len(), |i| host_start + i);

    if host_end == host_start {
        return None;
    }

    Some(UrlParts {
        scheme_end,
        host_start,
        host_end,
    })
}

/// A validated GraphQL endpoint URL.
///
/// Every request made by [`GraphqlClient`](crate::clients::GraphqlClient)
/// is a POST to this single URL.
///
/// # Example
///
/// ```rust
/// use charity_admin::GraphqlEndpoint;
///
/// let endpoint = GraphqlEndpoint::new("http://localhost:4000/graphql").unwrap();
/// assert_eq!(endpoint.scheme(), "http");
/// assert_eq!(endpoint.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphqlEndpoint {
    url: String,
    parts: UrlParts,
}

impl GraphqlEndpoint {
    /// The endpoint used by a local development server.
    pub const DEFAULT: &'static str = "http://localhost:4000/graphql";

    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL is not an
    /// `http` or `https` URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let parts =
            split_http_url(&url).ok_or_else(|| ConfigError::InvalidEndpoint { url: url.clone() })?;
        Ok(Self { url, parts })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.parts.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.parts.host_start..self.parts.host_end]
    }
}

impl Default for GraphqlEndpoint {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            parts: UrlParts {
                scheme_end: 4,
                host_start: 7,
                host_end: 16,
            },
        }
    }
}

impl AsRef<str> for GraphqlEndpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for GraphqlEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A validated base URL for uploaded media.
///
/// Post gallery images live under `<base>/uploads/posts/`. Trailing slashes
/// are stripped on construction so joined URLs never contain `//`.
///
/// # Example
///
/// ```rust
/// use charity_admin::UploadsBaseUrl;
///
/// let uploads = UploadsBaseUrl::new("https://cdn.example.org/").unwrap();
/// assert_eq!(
///     uploads.post_image_url("banner.jpg"),
///     "https://cdn.example.org/uploads/posts/banner.jpg"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadsBaseUrl(String);

impl UploadsBaseUrl {
    /// The uploads base used by a local development server.
    pub const DEFAULT: &'static str = "http://localhost:4000";

    /// Creates a new validated uploads base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUploadsBase`] if the URL is not an
    /// `http` or `https` URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        if split_http_url(&url).is_none() {
            return Err(ConfigError::InvalidUploadsBase { url });
        }
        Ok(Self(url))
    }

    /// Resolves a post image filename to its public URL.
    ///
    /// Leading slashes in `filename` are ignored.
    #[must_use]
    pub fn post_image_url(&self, filename: &str) -> String {
        format!(
            "{}{POST_UPLOADS_PATH}/{}",
            self.0,
            filename.trim_start_matches('/')
        )
    }
}

impl Default for UploadsBaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for UploadsBaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
