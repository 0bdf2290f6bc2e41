//! Staff roles and the console affordances they unlock.
//!
//! Role checks here only decide what the console offers. The server
//! enforces authorization independently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The role of a console account, mirroring the server's `StaffRole` enum.
///
/// # Example
///
/// ```rust
/// use charity_admin::StaffRole;
///
/// let role: StaffRole = "Admin".parse().unwrap();
/// assert!(role.can_manage_staff());
/// assert!(!StaffRole::Staff.can_manage_staff());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    /// Full access, including staff accounts and donation programs.
    #[serde(alias = "ADMIN")]
    Admin,
    /// Content authoring only.
    #[default]
    #[serde(alias = "STAFF")]
    Staff,
}

impl StaffRole {
    /// Returns the wire representation (`admin` or `staff`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }

    /// Returns `true` for administrators.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether the staff management screens should be offered.
    #[must_use]
    pub const fn can_manage_staff(&self) -> bool {
        self.is_admin()
    }

    /// Whether donation programs may be created, toggled or deleted.
    #[must_use]
    pub const fn can_manage_donations(&self) -> bool {
        self.is_admin()
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            _ => Err(ConfigError::InvalidStaffRole {
                role: s.to_string(),
            }),
        }
    }
}
