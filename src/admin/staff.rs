//! Staff accounts.
//!
//! Only administrators are offered these screens (see
//! [`StaffRole::can_manage_staff`]). Registering an email that is already
//! taken fails with [`GraphqlErrorKind::Duplicate`](crate::GraphqlErrorKind::Duplicate).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::admin::{deserialize_id, deserialize_optional_id, require_text, RecordId};
use crate::auth::StaffRole;
use crate::clients::graphql::GraphqlError;
use crate::clients::{GraphqlClient, Variables};

/// Lists every staff account.
pub const LIST_STAFF: &str = "query {
  users {
    id
    first_name
    last_name
    email
    role
    phone
    createdAt
    is_active
  }
}";

/// Registers a new staff account.
pub const REGISTER_STAFF: &str = "mutation Register($first_name: String!, $last_name: String!, $email: String!, $password: String!, $phone: String!, $role: StaffRole!) {
  staffRegister(first_name: $first_name, last_name: $last_name, email: $email, password: $password, phone: $phone, role: $role) {
    user { id }
  }
}";

/// Updates contact details. Every field except `$id` is optional.
pub const UPDATE_STAFF: &str = "mutation UpdateUser($id: Int!, $first_name: String, $last_name: String, $email: String, $phone: String) {
  updateUser(id: $id, first_name: $first_name, last_name: $last_name, email: $email, phone: $phone) {
    id
  }
}";

/// Enables or disables an account.
pub const SET_STAFF_STATUS: &str = "mutation UpdateStatus($id: Int!, $isActive: Boolean!) {
  updateUserStatus(id: $id, is_active: $isActive) { id is_active }
}";

/// A staff account as listed by `users`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StaffMember {
    /// Identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Account role.
    #[serde(default)]
    pub role: StaffRole,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Creation time in milliseconds since the epoch, sent as a string.
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "deserialize_optional_id"
    )]
    pub created_at_millis: Option<i64>,
    /// Whether the account can sign in.
    #[serde(default)]
    pub is_active: bool,
}

impl StaffMember {
    /// Returns `"first last"`, skipping a blank half.
    #[must_use]
    pub fn full_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first} {last}"),
            (false, true) => first.to_string(),
            _ => last.to_string(),
        }
    }

    /// Returns the creation time, if the server sent a valid one.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at_millis
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Case-insensitive match of `term` against name, email and role.
    ///
    /// A blank term matches every member.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.full_name().to_lowercase().contains(&term)
            || self.email.to_lowercase().contains(&term)
            || self.role.as_str().contains(&term)
    }

    /// The editable fields, as a starting point for [`StaffUpdate::between`].
    #[must_use]
    pub fn details(&self) -> StaffDetails {
        StaffDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone().unwrap_or_default(),
        }
    }
}

/// Contact details shared by registration and editing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaffDetails {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
}

/// A registration request.
#[derive(Clone, PartialEq, Eq)]
pub struct NewStaffMember {
    /// Contact details.
    pub details: StaffDetails,
    /// Initial password.
    pub password: String,
    /// Account role.
    pub role: StaffRole,
}

impl fmt::Debug for NewStaffMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewStaffMember")
            .field("details", &self.details)
            .field("password", &"*****")
            .field("role", &self.role)
            .finish()
    }
}

impl NewStaffMember {
    /// Builds the registration variables.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::InvalidInput`] if the name, email or password
    /// is blank.
    pub fn to_variables(&self) -> Result<Variables, GraphqlError> {
        let first_name = require_text("first name", &self.details.first_name)?;
        let last_name = require_text("last name", &self.details.last_name)?;
        let email = require_text("email", &self.details.email)?;
        if self.password.trim().is_empty() {
            return Err(GraphqlError::InvalidInput(
                "password cannot be blank".to_string(),
            ));
        }

        Ok(Variables::new()
            .with("first_name", json!(first_name))
            .with("last_name", json!(last_name))
            .with("email", json!(email))
            .with("password", json!(self.password))
            .with("phone", json!(self.details.phone.trim()))
            .with("role", json!(self.role.as_str())))
    }
}

/// The fields of an edit that actually changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaffUpdate {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
}

impl StaffUpdate {
    /// Keeps only the fields of `edited` that differ from `current`.
    #[must_use]
    pub fn between(current: &StaffMember, edited: &StaffDetails) -> Self {
        let changed = |old: &str, new: &str| (old != new).then(|| new.to_string());
        Self {
            first_name: changed(&current.first_name, &edited.first_name),
            last_name: changed(&current.last_name, &edited.last_name),
            email: changed(&current.email, &edited.email),
            phone: changed(current.phone.as_deref().unwrap_or_default(), &edited.phone),
        }
    }

    /// Returns `true` when nothing changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }

    /// Builds the update variables; unchanged fields are left out entirely.
    #[must_use]
    pub fn to_variables(&self, id: RecordId) -> Variables {
        let mut variables = Variables::new().with("id", json!(id));
        for (key, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ] {
            if let Some(value) = value {
                variables.set(key, json!(value));
            }
        }
        variables
    }
}

/// Status echoed back by [`set_status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct StaffStatus {
    /// Identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: RecordId,
    /// New status.
    pub is_active: bool,
}

#[derive(Deserialize)]
struct IdOnly {
    #[serde(deserialize_with = "deserialize_id")]
    id: RecordId,
}

#[derive(Deserialize)]
struct Registration {
    user: IdOnly,
}

/// Fetches all staff accounts.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the request fails.
pub async fn list(client: &GraphqlClient) -> Result<Vec<StaffMember>, GraphqlError> {
    let members: Option<Vec<StaffMember>> = client
        .execute_field(LIST_STAFF, &Variables::new(), "users")
        .await?;
    Ok(members.unwrap_or_default())
}

/// Registers `member` and returns the new account's id.
///
/// # Errors
///
/// Returns [`GraphqlError::InvalidInput`] for blank required fields without
/// sending anything. A taken email yields an error whose
/// [`kind`](GraphqlError::kind) is `Duplicate`.
pub async fn register(
    client: &GraphqlClient,
    member: &NewStaffMember,
) -> Result<RecordId, GraphqlError> {
    let variables = member.to_variables()?;
    let registration: Registration = client
        .execute_field(REGISTER_STAFF, &variables, "staffRegister")
        .await?;
    tracing::info!("Registered staff account {}", registration.user.id);
    Ok(registration.user.id)
}

/// Applies `update` to account `id`.
///
/// Returns `Ok(None)` without contacting the server when `update` is empty.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the request fails.
pub async fn update(
    client: &GraphqlClient,
    id: RecordId,
    update: &StaffUpdate,
) -> Result<Option<RecordId>, GraphqlError> {
    if update.is_empty() {
        tracing::debug!("No changes for staff account {}; skipping update", id);
        return Ok(None);
    }
    let updated: IdOnly = client
        .execute_field(UPDATE_STAFF, &update.to_variables(id), "updateUser")
        .await?;
    Ok(Some(updated.id))
}

/// Enables or disables account `id`.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the request fails.
pub async fn set_status(
    client: &GraphqlClient,
    id: RecordId,
    active: bool,
) -> Result<StaffStatus, GraphqlError> {
    let variables = Variables::new()
        .with("id", json!(id))
        .with("isActive", json!(active));
    client
        .execute_field(SET_STAFF_STATUS, &variables, "updateUserStatus")
        .await
}
