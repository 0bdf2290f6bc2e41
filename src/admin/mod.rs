//! Typed operations behind the console screens.
//!
//! Each submodule holds the GraphQL documents for one screen and thin async
//! functions that bind variables, call [`GraphqlClient`](crate::clients::GraphqlClient)
//! and decode the result.
//!
//! - [`categories`]: Post category taxonomy
//! - [`donations`]: Donation programs and their banner images
//! - [`staff`]: Staff accounts and roles
//!
//! Role checks (see [`StaffRole`](crate::StaffRole)) are the caller's job;
//! the server enforces authorization on its own.

pub mod categories;
pub mod donations;
pub mod staff;

use serde::{de, Deserialize, Deserializer};

use crate::clients::graphql::GraphqlError;

/// Record identifier as used by the console API.
pub type RecordId = i64;

/// Decodes an id sent either as a GraphQL `Int` or as an `ID` string.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(RecordId),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Int(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid record id '{text}'"))),
    }
}

/// Like [`deserialize_id`], for optional fields; `null` decodes to `None`.
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "deserialize_id")] RecordId);

    Option::<Wrapped>::deserialize(deserializer).map(|wrapped| wrapped.map(|Wrapped(id)| id))
}

/// Rejects blank text before it reaches the server.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String, GraphqlError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GraphqlError::InvalidInput(format!("{field} cannot be blank")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(deserialize_with = "deserialize_id")]
        id: RecordId,
    }

    #[test]
    fn test_id_from_int_or_string() {
        let from_int: Record = serde_json::from_value(json!({"id": 7})).unwrap();
        let from_text: Record = serde_json::from_value(json!({"id": "42"})).unwrap();
        assert_eq!(from_int.id, 7);
        assert_eq!(from_text.id, 42);
    }

    #[derive(Debug, Deserialize)]
    struct OptionalRecord {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<RecordId>,
    }

    #[test]
    fn test_optional_id_accepts_missing_null_and_text() {
        let missing: OptionalRecord = serde_json::from_value(json!({})).unwrap();
        let null: OptionalRecord = serde_json::from_value(json!({"id": null})).unwrap();
        let text: OptionalRecord = serde_json::from_value(json!({"id": "1700000000000"})).unwrap();
        assert_eq!(missing.id, None);
        assert_eq!(null.id, None);
        assert_eq!(text.id, Some(1_700_000_000_000));
    }

    #[test]
    fn test_id_rejects_non_numeric_string() {
        let result = serde_json::from_value::<Record>(json!({"id": "abc"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("title", "  News ").unwrap(), "News");
        let error = require_text("title", "   ").unwrap_err();
        assert!(matches!(error, GraphqlError::InvalidInput(_)));
        assert!(error.to_string().contains("title cannot be blank"));
    }
}
