//! Bearer tokens and the provider seam the GraphQL client reads them through.
//!
//! The client never reaches into global state for credentials. Instead it
//! asks a [`TokenProvider`] for the current token on every request, so a
//! login or logout between two calls is picked up without rebuilding the
//! client.
//!
//! # Example
//!
//! ```rust
//! use charity_admin::auth::{BearerToken, StaticToken, TokenProvider};
//!
//! let provider = StaticToken::new(BearerToken::new("abc").unwrap());
//! assert_eq!(provider.bearer_token().unwrap().authorization_value(), "Bearer abc");
//!
//! // The unit type means "anonymous"
//! assert!(().bearer_token().is_none());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;

/// A validated, non-empty bearer token.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `BearerToken(*****)`.
///
/// ```rust
/// use charity_admin::BearerToken;
///
/// let token = BearerToken::new("secret-session").unwrap();
/// assert_eq!(format!("{:?}", token), "BearerToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Creates a new bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBearerToken`] if the token is empty or
    /// only whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyBearerToken);
        }
        Ok(Self(token.to_string()))
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for BearerToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(*****)")
    }
}

/// Supplies the bearer token for outgoing requests.
///
/// Implementations are consulted once per request. Returning `None` sends
/// the request without an `Authorization` header.
pub trait TokenProvider: Send + Sync + fmt::Debug {
    /// Returns the token to present, if any.
    fn bearer_token(&self) -> Option<BearerToken>;
}

/// Anonymous access: never yields a token.
impl TokenProvider for () {
    fn bearer_token(&self) -> Option<BearerToken> {
        None
    }
}

impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    fn bearer_token(&self) -> Option<BearerToken> {
        (**self).bearer_token()
    }
}

/// A provider that always returns the same token.
///
/// Useful for scripts and tests where the token is known up front.
#[derive(Clone, Debug)]
pub struct StaticToken(BearerToken);

impl StaticToken {
    /// Wraps a fixed token.
    #[must_use]
    pub const fn new(token: BearerToken) -> Self {
        Self(token)
    }
}

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<BearerToken> {
        Some(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_rejects_empty() {
        assert!(matches!(
            BearerToken::new(""),
            Err(ConfigError::EmptyBearerToken)
        ));
        assert!(matches!(
            BearerToken::new("   "),
            Err(ConfigError::EmptyBearerToken)
        ));
    }

    #[test]
    fn test_bearer_token_trims_whitespace() {
        let token = BearerToken::new(" abc \n").unwrap();
        assert_eq!(token.as_ref(), "abc");
    }

    #[test]
    fn test_bearer_token_masks_debug_output() {
        let token = BearerToken::new("super-secret").unwrap();
        let debug = format!("{token:?}");
        assert_eq!(debug, "BearerToken(*****)");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_static_token_always_returns_token() {
        let provider = StaticToken::new(BearerToken::new("t1").unwrap());
        assert_eq!(provider.bearer_token().unwrap().as_ref(), "t1");
        assert_eq!(provider.bearer_token().unwrap().as_ref(), "t1");
    }

    #[test]
    fn test_unit_provider_is_anonymous() {
        assert!(().bearer_token().is_none());
    }

    #[test]
    fn test_arc_provider_delegates() {
        let provider: Arc<dyn TokenProvider> =
            Arc::new(StaticToken::new(BearerToken::new("shared").unwrap()));
        assert_eq!(provider.bearer_token().unwrap().as_ref(), "shared");
    }
}
