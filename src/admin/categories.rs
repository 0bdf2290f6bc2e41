//! Post categories.
//!
//! Categories are shared by posts and donation programs. Inactive
//! categories stay listed for administrators but are hidden from pickers.

use serde::Deserialize;
use serde_json::json;

use crate::admin::{deserialize_id, require_text, RecordId};
use crate::clients::graphql::GraphqlError;
use crate::clients::{GraphqlClient, Variables};

/// Lists every category.
pub const LIST_CATEGORIES: &str = "query { getCategories { id title is_active } }";

/// Creates a category.
pub const CREATE_CATEGORY: &str = "mutation CreateCategory($title: String!) {
  createCategory(title: $title) { id title }
}";

/// Renames a category.
pub const UPDATE_CATEGORY: &str = "mutation UpdateCategory($id: Int!, $title: String!) {
  updateCategory(id: $id, title: $title) { id title }
}";

/// Activates or deactivates a category.
pub const SET_CATEGORY_STATUS: &str = "mutation ToggleStatus($id: Int!, $active: Boolean!) {
  updateCategoryStatus(id: $id, is_active: $active) { id is_active }
}";

/// A category as listed by `getCategories`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    /// Display title.
    pub title: String,
    /// Whether the category can be picked for new content.
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

/// The fields a mutation echoes back.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CategoryRef {
    /// Identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    /// Title, when requested.
    #[serde(default)]
    pub title: Option<String>,
    /// Status, when requested.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Fetches all categories.
///
/// A `null` list is treated as empty.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the request fails.
pub async fn list(client: &GraphqlClient) -> Result<Vec<Category>, GraphqlError> {
    let categories: Option<Vec<Category>> = client
        .execute_field(LIST_CATEGORIES, &Variables::new(), "getCategories")
        .await?;
    Ok(categories.unwrap_or_default())
}

/// Fetches only active categories, for pickers.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the request fails.
pub async fn list_active(client: &GraphqlClient) -> Result<Vec<Category>, GraphqlError> {
    let mut categories = list(client).await?;
    categories.retain(|category| category.is_active);
    Ok(categories)
}

/// Creates a category named `title`.
///
/// # Errors
///
/// Returns [`GraphqlError::InvalidInput`] for a blank title without sending
/// anything, or [`GraphqlError`] if the request fails.
pub async fn create(client: &GraphqlClient, title: &str) -> Result<CategoryRef, GraphqlError> {
    let title = require_text("title", title)?;
    let variables = Variables::new().with("title", json!(title));
    client
        .execute_field(CREATE_CATEGORY, &variables, "createCategory")
        .await
}

/// Renames category `id`.
///
/// # Errors
///
/// Returns [`GraphqlError::InvalidInput`] for a blank title without sending
/// anything, or [`GraphqlError`] if the request fails.
pub async fn update_title(
    client: &GraphqlClient,
    id: RecordId,
    title: &str,
) -> Result<CategoryRef, GraphqlError> {
    let title = require_text("title", title)?;
    let variables = Variables::new()
        .with("id", json!(id))
        .with("title", json!(title));
    client
        .execute_field(UPDATE_CATEGORY, &variables, "updateCategory")
        .await
}

/// Sets whether category `id` is active.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the request fails.
pub async fn set_status(
    client: &GraphqlClient,
    id: RecordId,
    active: bool,
) -> Result<CategoryRef, GraphqlError> {
    let variables = Variables::new()
        .with("id", json!(id))
        .with("active", json!(active));
    client
        .execute_field(SET_CATEGORY_STATUS, &variables, "updateCategoryStatus")
        .await
}
