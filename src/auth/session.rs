//! Session state for a signed-in console user.
//!
//! This module provides [`SessionStore`], the explicit replacement for a
//! token kept in ambient client storage. It is written at login, read on
//! every request through [`TokenProvider`], and cleared at logout.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::auth::{BearerToken, StaffRole, TokenProvider};

/// Who is signed in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// Login email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: StaffRole,
}

impl StaffProfile {
    /// Creates a profile.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: StaffRole) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role,
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<BearerToken>,
    profile: Option<StaffProfile>,
}

/// Process-wide session state, shared by reference with the client.
///
/// There is no refresh mechanism: an expired token is only noticed when a
/// request fails, at which point the caller should [`logout`](Self::logout).
///
/// # Thread Safety
///
/// `SessionStore` is `Send + Sync`; wrap it in an `Arc` to share it between
/// the client and the code that handles login.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use charity_admin::auth::{BearerToken, SessionStore, StaffProfile, TokenProvider};
/// use charity_admin::StaffRole;
///
/// let session = Arc::new(SessionStore::new());
/// assert!(session.bearer_token().is_none());
///
/// session.login(
///     BearerToken::new("jwt").unwrap(),
///     StaffProfile::new("ana@example.org", "Ana", StaffRole::Admin),
/// );
/// assert!(session.is_authenticated());
/// assert_eq!(session.role(), Some(StaffRole::Admin));
///
/// session.logout();
/// assert!(!session.is_authenticated());
/// ```
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

// Verify SessionStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionStore>();
};

impl SessionStore {
    /// Creates an empty, signed-out store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds a consistent SessionState.
    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a successful login, replacing any previous session.
    pub fn login(&self, token: BearerToken, profile: StaffProfile) {
        tracing::debug!("Session started for {} ({})", profile.email, profile.role);
        let mut state = self.write();
        state.token = Some(token);
        state.profile = Some(profile);
    }

    /// Clears the token and profile.
    pub fn logout(&self) {
        let mut state = self.write();
        if let Some(profile) = state.profile.take() {
            tracing::debug!("Session ended for {}", profile.email);
        }
        state.token = None;
    }

    /// Returns `true` while a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Returns a copy of the signed-in profile.
    #[must_use]
    pub fn profile(&self) -> Option<StaffProfile> {
        self.read().profile.clone()
    }

    /// Returns the signed-in role.
    #[must_use]
    pub fn role(&self) -> Option<StaffRole> {
        self.read().profile.as_ref().map(|p| p.role)
    }
}

impl TokenProvider for SessionStore {
    fn bearer_token(&self) -> Option<BearerToken> {
        self.read().token.clone()
    }
}
