//! GraphQL-specific error types for the admin console client.
//!
//! # Error Handling
//!
//! - [`GraphqlError::Http`]: Transport failures (network, non-JSON body)
//! - [`GraphqlError::Graphql`]: The server answered with a non-empty `errors`
//!   array; carries the first message verbatim and a [`GraphqlErrorKind`]
//! - [`GraphqlError::Decode`]: The `data` payload did not match the expected type
//!
//! Callers branch on [`GraphqlError::kind`] instead of searching message text.
//!
//! # Example
//!
//! ```rust,ignore
//! use charity_admin::clients::graphql::{GraphqlError, GraphqlErrorKind};
//!
//! match staff::register(&client, &member).await {
//!     Ok(id) => println!("Created staff member {id}"),
//!     Err(e) if e.kind() == GraphqlErrorKind::Duplicate => {
//!         println!("This email is already registered to another user.");
//!     }
//!     Err(e) => println!("{e}"),
//! }
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::clients::HttpError;

/// A location inside the GraphQL document.
///
/// Missing coordinates decode as `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorLocation {
    /// One-based line.
    #[serde(default)]
    pub line: u32,
    /// One-based column.
    #[serde(default)]
    pub column: u32,
}

/// One entry of a response's `errors` array.
///
/// Decoding never fails. Servers do not always follow the GraphQL response
/// format, so a bare string becomes the message, a non-string `message` is
/// rendered as JSON text and malformed `locations` are skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphqlErrorEntry {
    /// Human-readable description.
    pub message: String,
    /// Source locations, when the server reports them.
    pub locations: Option<Vec<ErrorLocation>>,
    /// Path to the failing field.
    pub path: Option<Vec<Value>>,
    /// Server-specific details such as `code`.
    pub extensions: Option<Map<String, Value>>,
}

impl<'de> Deserialize<'de> for GraphqlErrorEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl From<Value> for GraphqlErrorEntry {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl GraphqlErrorEntry {
    fn from_value(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(fields) => fields,
            Value::String(message) => {
                return Self {
                    message,
                    ..Self::default()
                }
            }
            Value::Null => return Self::default(),
            other => {
                return Self {
                    message: other.to_string(),
                    ..Self::default()
                }
            }
        };

        let message = match fields.remove("message") {
            Some(Value::String(message)) => message,
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        };
        let locations = match fields.remove("locations") {
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => None,
        };
        let path = match fields.remove("path") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        };
        let extensions = match fields.remove("extensions") {
            Some(Value::Object(extensions)) => Some(extensions),
            _ => None,
        };

        Self {
            message,
            locations,
            path,
            extensions,
        }
    }

    /// Returns `extensions.code`, if present.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.get("code"))
            .and_then(Value::as_str)
    }
}

/// The category of a failed call.
///
/// The server publishes no stable error-code contract, so the kind is
/// inferred: `extensions.code` wins when it holds a well-known value,
/// otherwise known message phrases are matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphqlErrorKind {
    /// A unique value (such as an email address) is already taken.
    Duplicate,
    /// The token is missing, invalid or expired.
    Unauthenticated,
    /// The account may not perform the operation.
    Forbidden,
    /// The referenced record does not exist.
    NotFound,
    /// The document or its variables were rejected.
    InvalidInput,
    /// Any other GraphQL error.
    Other,
    /// The request never produced a GraphQL answer.
    Transport,
    /// The answer did not have the expected shape.
    Decode,
}

impl GraphqlErrorKind {
    /// Classifies a GraphQL error entry.
    #[must_use]
    pub fn classify(entry: &GraphqlErrorEntry) -> Self {
        if let Some(kind) = entry.code().and_then(Self::from_code) {
            return kind;
        }
        Self::from_message(&entry.message)
    }

    fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "UNAUTHENTICATED" => Some(Self::Unauthenticated),
            "FORBIDDEN" => Some(Self::Forbidden),
            "NOT_FOUND" => Some(Self::NotFound),
            "CONFLICT" | "DUPLICATE" => Some(Self::Duplicate),
            "BAD_USER_INPUT" | "GRAPHQL_VALIDATION_FAILED" | "GRAPHQL_PARSE_FAILED" => {
                Some(Self::InvalidInput)
            }
            _ => None,
        }
    }

    fn from_message(message: &str) -> Self {
        let message = message.to_lowercase();
        let has = |needle: &str| message.contains(needle);

        if has("unique constraint") || has("duplicate") || has("exists") {
            Self::Duplicate
        } else if has("not authenticated")
            || has("unauthenticated")
            || has("unauthorized")
            || has("jwt")
            || has("token")
        {
            Self::Unauthenticated
        } else if has("forbidden") || has("not allowed") || has("permission") {
            Self::Forbidden
        } else if has("not found") || has("does not exist") {
            Self::NotFound
        } else {
            Self::Other
        }
    }
}

/// The server answered with a non-empty `errors` array.
///
/// Displays as the first error's message, unchanged.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct GraphqlResponseError {
    /// Classification of the first error.
    pub kind: GraphqlErrorKind,
    /// The first error's message.
    pub message: String,
    /// Every error the server reported.
    pub errors: Vec<GraphqlErrorEntry>,
    /// Partial `data`, if the server sent any alongside the errors.
    pub data: Option<Value>,
}

impl GraphqlResponseError {
    /// Builds the error from a non-empty `errors` array.
    #[must_use]
    pub fn new(errors: Vec<GraphqlErrorEntry>, data: Option<Value>) -> Self {
        let first = errors.first().cloned().unwrap_or_default();
        Self {
            kind: GraphqlErrorKind::classify(&first),
            message: first.message,
            errors,
            data,
        }
    }
}

/// Error type for GraphQL operations.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server reported GraphQL errors.
    #[error(transparent)]
    Graphql(#[from] GraphqlResponseError),

    /// The response did not decode into the expected type.
    #[error("Unexpected response shape for {context}: {source}")]
    Decode {
        /// What was being decoded (e.g., `getCategories`).
        context: String,
        /// The decoding failure.
        source: serde_json::Error,
    },

    /// A caller-supplied value was rejected before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GraphqlError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> GraphqlErrorKind {
        match self {
            Self::Http(_) => GraphqlErrorKind::Transport,
            Self::Graphql(e) => e.kind,
            Self::Decode { .. } => GraphqlErrorKind::Decode,
            Self::InvalidInput(_) => GraphqlErrorKind::InvalidInput,
        }
    }

    /// Returns `true` when a unique value was already taken.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.kind() == GraphqlErrorKind::Duplicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::NonJsonResponseError;
    use serde_json::json;

    fn entry(value: Value) -> GraphqlErrorEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_response_error_displays_first_message_exactly() {
        let error = GraphqlResponseError::new(
            vec![
                entry(json!({"message": "Email exists"})),
                entry(json!({"message": "second"})),
            ],
            None,
        );
        assert_eq!(error.to_string(), "Email exists");
        assert_eq!(GraphqlError::from(error).to_string(), "Email exists");
    }

    #[test]
    fn test_duplicate_detected_from_message() {
        for message in [
            "Email exists",
            "duplicate key value violates unique constraint \"users_email_key\"",
            "A category with this title already exists",
        ] {
            let error = GraphqlResponseError::new(vec![entry(json!({ "message": message }))], None);
            assert_eq!(error.kind, GraphqlErrorKind::Duplicate, "{message}");
        }
    }

    #[test]
    fn test_extension_code_wins_over_message() {
        let error = GraphqlResponseError::new(
            vec![entry(json!({
                "message": "Email exists",
                "extensions": {"code": "UNAUTHENTICATED"}
            }))],
            None,
        );
        assert_eq!(error.kind, GraphqlErrorKind::Unauthenticated);
    }

    #[test]
    fn test_unknown_extension_code_falls_back_to_message() {
        let error = GraphqlResponseError::new(
            vec![entry(json!({
                "message": "Category not found",
                "extensions": {"code": "INTERNAL_SERVER_ERROR"}
            }))],
            None,
        );
        assert_eq!(error.kind, GraphqlErrorKind::NotFound);
    }

    #[test]
    fn test_message_classification() {
        let kind = |m: &str| GraphqlErrorKind::classify(&entry(json!({ "message": m })));
        assert_eq!(kind("jwt expired"), GraphqlErrorKind::Unauthenticated);
        assert_eq!(kind("Not authenticated"), GraphqlErrorKind::Unauthenticated);
        assert_eq!(kind("Forbidden: admins only"), GraphqlErrorKind::Forbidden);
        assert_eq!(kind("User does not exist"), GraphqlErrorKind::NotFound);
        assert_eq!(kind("Something broke"), GraphqlErrorKind::Other);
    }

    #[test]
    fn test_entry_tolerates_missing_fields() {
        let parsed = entry(json!({}));
        assert_eq!(parsed.message, "");
        assert!(parsed.code().is_none());

        let full = entry(json!({
            "message": "bad",
            "locations": [{"line": 1, "column": 3}],
            "path": ["createCategory"],
            "extensions": {"code": "BAD_USER_INPUT"}
        }));
        assert_eq!(full.locations, Some(vec![ErrorLocation { line: 1, column: 3 }]));
        assert_eq!(full.code(), Some("BAD_USER_INPUT"));
        assert_eq!(GraphqlErrorKind::classify(&full), GraphqlErrorKind::InvalidInput);
    }

    #[test]
    fn test_entry_accepts_partial_locations() {
        let parsed = entry(json!({
            "message": "Email exists",
            "locations": [{"line": 1}, "garbage"]
        }));
        assert_eq!(parsed.message, "Email exists");
        assert_eq!(parsed.locations, Some(vec![ErrorLocation { line: 1, column: 0 }]));
        assert_eq!(GraphqlErrorKind::classify(&parsed), GraphqlErrorKind::Duplicate);
    }

    #[test]
    fn test_entry_accepts_irregular_shapes() {
        assert_eq!(entry(json!("Email exists")).message, "Email exists");
        assert_eq!(entry(json!({"message": null})).message, "");
        assert_eq!(entry(json!({"message": 42})).message, "42");
        assert_eq!(entry(json!(null)), GraphqlErrorEntry::default());

        let odd = entry(json!({"message": "x", "path": "nope", "extensions": []}));
        assert!(odd.path.is_none());
        assert!(odd.code().is_none());
    }

    #[test]
    fn test_http_error_kind_is_transport() {
        let error: GraphqlError =
            HttpError::from(NonJsonResponseError::new(500, None, "oops")).into();
        assert_eq!(error.kind(), GraphqlErrorKind::Transport);
        assert!(!error.is_duplicate());
    }

    #[test]
    fn test_is_duplicate() {
        let error: GraphqlError =
            GraphqlResponseError::new(vec![entry(json!({"message": "Email exists"}))], None).into();
        assert!(error.is_duplicate());
    }

    #[test]
    fn test_all_error_variants_implement_std_error() {
        let error: &dyn std::error::Error = &GraphqlError::InvalidInput("blank".to_string());
        let _ = error;
    }
}
