//! Donation programs.
//!
//! A program pairs a category with a description and a banner image. The
//! banner is uploaded together with the creating mutation as a multipart
//! request. Programs are hidden from donors by deactivating them.

use serde::Deserialize;
use serde_json::json;

use crate::admin::{deserialize_id, deserialize_optional_id, require_text, RecordId};
use crate::clients::graphql::GraphqlError;
use crate::clients::{FileUpload, GraphqlClient, Variables};
use crate::config::UploadsBaseUrl;

/// Lists every program with its category.
pub const LIST_DONATIONS: &str = "query {
  donations {
    id
    description
    image
    is_active
    category { id title is_active }
  }
}";

/// Creates a program, uploading its banner as `$file`.
pub const CREATE_DONATION: &str =
    "mutation CreateDonation($categoryId: Int!, $description: String!, $file: Upload!) {
  createDonation(category_id: $categoryId, description: $description, File: $file) {
    id image is_active category { title }
  }
}";

/// Activates or deactivates a program. The field name matches the server's
/// schema, spelling included.
pub const SET_DONATION_STATUS: &str =
    "mutation UpdateDontationStatus($id: Int!, $active: Boolean!) {
  updateDontationStatus(id: $id, is_active: $active) { id is_active }
}";

/// Deletes a program.
pub const DELETE_DONATION: &str = "mutation DeleteDonation($id: Int!) {
  deleteDonation(id: $id) { message }
}";

/// The category embedded in a program.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DonationCategory {
    /// Identifier, when requested.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<RecordId>,
    /// Display title.
    pub title: String,
    /// Status, when requested.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A donation program.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DonationProgram {
    /// Identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    /// Description shown to donors.
    #[serde(default)]
    pub description: Option<String>,
    /// Banner image filename.
    #[serde(default)]
    pub image: Option<String>,
    /// Whether donors can see the program.
    #[serde(default)]
    pub is_active: bool,
    /// The program's category.
    #[serde(default)]
    pub category: Option<DonationCategory>,
}

impl DonationProgram {
    /// Resolves the banner filename to a public URL.
    ///
    /// Banners are assumed to share the post upload directory
    /// ([`POST_UPLOADS_PATH`](crate::config::POST_UPLOADS_PATH)); the server
    /// does not report a separate location for them.
    #[must_use]
    pub fn image_url(&self, uploads: &UploadsBaseUrl) -> Option<String> {
        self.image
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(|name| uploads.post_image_url(name))
    }

    /// Returns the category title, if known.
    #[must_use]
    pub fn category_title(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.title.as_str())
    }
}

/// Status echoed back by [`set_status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct DonationStatus {
    /// Identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    /// New status.
    pub is_active: bool,
}

#[derive(Deserialize)]
struct DeleteResult {
    #[serde(default)]
    message: Option<String>,
}

/// Fetches all programs.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the request fails.
pub async fn list(client: &GraphqlClient) -> Result<Vec<DonationProgram>, GraphqlError> {
    let programs: Option<Vec<DonationProgram>> = client
        .execute_field(LIST_DONATIONS, &Variables::new(), "donations")
        .await?;
    Ok(programs.unwrap_or_default())
}

/// Builds the variables for [`create`].
///
/// # Errors
///
/// Returns [`GraphqlError::InvalidInput`] for a blank description or an
/// empty banner file.
pub fn create_variables(
    category_id: RecordId,
    description: &str,
    banner: FileUpload,
) -> Result<Variables, GraphqlError> {
    let description = require_text("description", description)?;
    if banner.is_empty() {
        return Err(GraphqlError::InvalidInput(
            "banner image cannot be empty".to_string(),
        ));
    }
    Ok(Variables::new()
        .with("categoryId", json!(category_id))
        .with("description", json!(description))
        .with("file", banner))
}

/// Creates a program in `category_id`, uploading `banner`.
///
/// # Errors
///
/// Returns [`GraphqlError::InvalidInput`] for a blank description or empty
/// banner without sending anything, or [`GraphqlError`] if the request fails.
pub async fn create(
    client: &GraphqlClient,
    category_id: RecordId,
    description: &str,
    banner: FileUpload,
) -> Result<DonationProgram, GraphqlError> {
    let variables = create_variables(category_id, description, banner)?;
    client
        .execute_field(CREATE_DONATION, &variables, "createDonation")
        .await
}

/// Shows or hides program `id`.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the request fails.
pub async fn set_status(
    client: &GraphqlClient,
    id: RecordId,
    active: bool,
) -> Result<DonationStatus, GraphqlError> {
    let variables = Variables::new()
        .with("id", json!(id))
        .with("active", json!(active));
    client
        .execute_field(SET_DONATION_STATUS, &variables, "updateDontationStatus")
        .await
}

/// Deletes program `id` and returns the server's confirmation message.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the request fails.
pub async fn delete(client: &GraphqlClient, id: RecordId) -> Result<String, GraphqlError> {
    let variables = Variables::new().with("id", json!(id));
    let result: Option<DeleteResult> = client
        .execute_field(DELETE_DONATION, &variables, "deleteDonation")
        .await?;
    Ok(result.and_then(|r| r.message).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::VariableValue;

    #[test]
    fn test_program_decodes_nested_category() {
        let program: DonationProgram = serde_json::from_value(json!({
            "id": "9",
            "description": "Clean water",
            "image": "well.jpg",
            "is_active": true,
            "category": {"id": 2, "title": "Health", "is_active": true}
        }))
        .unwrap();

        assert_eq!(program.id, 9);
        assert_eq!(program.category_title(), Some("Health"));
        assert_eq!(program.category.unwrap().id, Some(2));
    }

    #[test]
    fn test_program_tolerates_sparse_create_echo() {
        let program: DonationProgram = serde_json::from_value(json!({
            "id": 10,
            "image": "b.png",
            "is_active": true,
            "category": {"title": "Food"}
        }))
        .unwrap();
        assert!(program.description.is_none());
        assert_eq!(program.category.unwrap().id, None);
    }

    #[test]
    fn test_image_url() {
        let program: DonationProgram =
            serde_json::from_value(json!({"id": 1, "image": "well.jpg"})).unwrap();
        assert_eq!(
            program.image_url(&UploadsBaseUrl::default()).as_deref(),
            Some("http://localhost:4000/uploads/posts/well.jpg")
        );

        let no_image: DonationProgram =
            serde_json::from_value(json!({"id": 1, "image": ""})).unwrap();
        assert!(no_image.image_url(&UploadsBaseUrl::default()).is_none());
    }

    #[test]
    fn test_create_variables_carry_banner_as_file() {
        let variables =
            create_variables(4, "Warm meals", FileUpload::new("meal.jpg", vec![1, 2, 3])).unwrap();

        assert_eq!(variables.file_count(), 1);
        assert!(matches!(variables.get("file"), Some(VariableValue::File(_))));
        assert_eq!(
            variables.to_json(),
            json!({"categoryId": 4, "description": "Warm meals", "file": null})
        );
    }

    #[test]
    fn test_create_variables_reject_blank_description_and_empty_banner() {
        assert!(create_variables(1, " ", FileUpload::new("a.jpg", vec![1])).is_err());
        assert!(create_variables(1, "ok", FileUpload::new("a.jpg", Vec::new())).is_err());
    }
}
