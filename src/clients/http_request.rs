//! Request bodies for the GraphQL endpoint.
//!
//! Every request is a POST to the same URL, so a request is fully described
//! by its body and the wire format that body implies.

use std::fmt;

/// The two encodings a GraphQL request can travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireFormat {
    /// `application/json` body of `{"query", "variables"}`.
    Json,
    /// `multipart/form-data` body following the GraphQL multipart request convention.
    Multipart,
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Multipart => write!(f, "multipart"),
        }
    }
}

/// The body of a request to the GraphQL endpoint.
#[derive(Debug)]
pub enum RequestBody {
    /// A JSON document, sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// A multipart form; `reqwest` writes the `Content-Type` with its boundary.
    Multipart(reqwest::multipart::Form),
}

impl RequestBody {
    /// Returns the wire format of this body.
    #[must_use]
    pub const fn wire_format(&self) -> WireFormat {
        match self {
            Self::Json(_) => WireFormat::Json,
            Self::Multipart(_) => WireFormat::Multipart,
        }
    }

    /// Returns the `Content-Type` this crate sets explicitly, if any.
    ///
    /// Multipart bodies return `None`: the header must carry a boundary
    /// generated by the HTTP stack.
    #[must_use]
    pub const fn explicit_content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::Multipart(_) => None,
        }
    }
}
