//! Authentication types for the admin console client.
//!
//! # Overview
//!
//! - [`BearerToken`]: A validated session token with masked debug output
//! - [`TokenProvider`]: The seam through which the client reads the token
//! - [`StaticToken`]: A provider for a fixed token
//! - [`SessionStore`]: Login/logout state that also acts as a provider
//! - [`StaffRole`] and [`StaffProfile`]: Who is signed in
//!
//! # Session Lifecycle
//!
//! Tokens are issued by the server's login mutation (outside this crate),
//! stored with [`SessionStore::login`], presented on every request as
//! `Authorization: Bearer <token>`, and dropped with
//! [`SessionStore::logout`]. Tokens are never refreshed.

mod role;
mod session;
mod token;

pub use role::StaffRole;
pub use session::{SessionStore, StaffProfile};
pub use token::{BearerToken, StaticToken, TokenProvider};
