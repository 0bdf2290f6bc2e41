//! HTTP-specific error types for the admin console client.
//!
//! # Error Handling
//!
//! - [`NonJsonResponseError`]: Responses whose body is not JSON (never parsed)
//! - [`MultipartError`]: Failures while encoding a file upload
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! Every error is terminal for the call that produced it; nothing is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use charity_admin::clients::HttpError;
//!
//! match client.post(body).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::NonJson(e)) => eprintln!("Server sent {}: {}", e.describe_content_type(), e.body_prefix),
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```

use thiserror::Error;

/// Number of body characters kept for diagnostics on non-JSON responses.
pub const BODY_PREFIX_CHARS: usize = 200;

/// Error returned when the server answers with something other than JSON.
///
/// A reverse proxy error page or a framework's HTML 404 typically ends up
/// here. The body is kept only as a short prefix and is never parsed.
///
/// # Example
///
/// ```rust
/// use charity_admin::clients::NonJsonResponseError;
///
/// let error = NonJsonResponseError::new(502, Some("text/html".to_string()), "<html>Bad gateway</html>");
/// assert!(error.to_string().contains("text/html"));
/// assert_eq!(error.body_prefix, "<html>Bad gateway</html>");
/// ```
#[derive(Debug, Error)]
#[error("Server error: expected a JSON response but got {} (HTTP {code}). Check server logs.", .content_type.as_deref().unwrap_or("no content type"))]
pub struct NonJsonResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
    /// The first [`BODY_PREFIX_CHARS`] characters of the body.
    pub body_prefix: String,
}

impl NonJsonResponseError {
    /// Creates the error, truncating `body` to [`BODY_PREFIX_CHARS`] characters.
    #[must_use]
    pub fn new(code: u16, content_type: Option<String>, body: &str) -> Self {
        Self {
            code,
            content_type,
            body_prefix: body.chars().take(BODY_PREFIX_CHARS).collect(),
        }
    }

    /// Returns the content type, or `no content type` when absent.
    #[must_use]
    pub fn describe_content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or("no content type")
    }
}

/// Failure while encoding a multipart form.
#[derive(Debug, Error)]
pub enum MultipartError {
    /// `operations` or `map` could not be serialized.
    #[error("Failed to serialize multipart field: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A file part was rejected by the HTTP layer (e.g., a malformed MIME type).
    #[error("Invalid file part: {0}")]
    Part(#[from] reqwest::Error),
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A response that was not JSON.
    #[error(transparent)]
    NonJson(#[from] NonJsonResponseError),

    /// A response that claimed to be JSON but did not decode.
    #[error("Invalid JSON response (HTTP {code}): {source}")]
    InvalidJson {
        /// The HTTP status code of the response.
        code: u16,
        /// The decoding failure.
        source: serde_json::Error,
    },

    /// The upload form could not be built.
    #[error(transparent)]
    Multipart(#[from] MultipartError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_json_error_truncates_body() {
        let body = "x".repeat(500);
        let error = NonJsonResponseError::new(500, Some("text/html".to_string()), &body);
        assert_eq!(error.body_prefix.chars().count(), BODY_PREFIX_CHARS);
    }

    #[test]
    fn test_non_json_error_truncates_on_char_boundary() {
        let body = "é".repeat(300);
        let error = NonJsonResponseError::new(200, None, &body);
        assert_eq!(error.body_prefix, "é".repeat(BODY_PREFIX_CHARS));
    }

    #[test]
    fn test_non_json_error_message_names_content_type() {
        let error = NonJsonResponseError::new(404, Some("text/html; charset=utf-8".to_string()), "");
        let message = error.to_string();
        assert!(message.contains("text/html; charset=utf-8"));
        assert!(message.contains("HTTP 404"));

        let missing = NonJsonResponseError::new(200, None, "");
        assert!(missing.to_string().contains("no content type"));
    }

    #[test]
    fn test_http_error_wraps_non_json() {
        let error: HttpError = NonJsonResponseError::new(502, None, "bad gateway").into();
        assert!(matches!(error, HttpError::NonJson(_)));
        assert!(error.to_string().starts_with("Server error"));
    }

    #[test]
    fn test_invalid_json_names_status() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = HttpError::InvalidJson { code: 200, source };
        assert!(error.to_string().contains("HTTP 200"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let non_json: &dyn std::error::Error = &NonJsonResponseError::new(500, None, "");
        let _ = non_json;
    }
}
