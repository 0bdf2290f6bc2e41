//! The GraphQL response envelope.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::clients::graphql::errors::GraphqlErrorEntry;

/// `{ data?, errors?, extensions? }` as returned by the server.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphqlResponse {
    /// The result of the operation.
    #[serde(default)]
    pub data: Option<Value>,
    /// Errors raised while executing the operation.
    ///
    /// A single object or string in place of the array counts as one error.
    #[serde(default, deserialize_with = "deserialize_errors")]
    pub errors: Option<Vec<GraphqlErrorEntry>>,
    /// Server-specific metadata.
    #[serde(default)]
    pub extensions: Option<Value>,
}

fn deserialize_errors<'de, D>(deserializer: D) -> Result<Option<Vec<GraphqlErrorEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Array(items) => Some(items.into_iter().map(GraphqlErrorEntry::from).collect()),
        other => Some(vec![GraphqlErrorEntry::from(other)]),
    })
}

impl GraphqlResponse {
    /// Returns `true` if the `errors` array is present and non-empty.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}
