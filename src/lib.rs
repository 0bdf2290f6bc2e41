//! # Charity Admin API
//!
//! A Rust client for the GraphQL API behind a non-profit's admin console,
//! providing validated configuration, bearer-token authentication, file
//! uploads over the GraphQL multipart request convention, and typed
//! operations for the console screens.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ConsoleConfig`] and [`ConsoleConfigBuilder`]
//! - Validated newtypes for the endpoint, uploads base URL and tokens
//! - Session state via [`SessionStore`], injected into the client as a [`TokenProvider`]
//! - A [`GraphqlClient`] that sends JSON, or multipart when variables hold files
//! - Structured errors with a [`GraphqlErrorKind`] for branching on failures
//! - A tolerant parser for stored post galleries via [`gallery`]
//! - Category, donation and staff operations via [`admin`]
//!
//! ## Quick Start
//!
//! ```rust
//! use charity_admin::{ConsoleConfig, GraphqlEndpoint, UploadsBaseUrl};
//!
//! let config = ConsoleConfig::builder()
//!     .endpoint(GraphqlEndpoint::new("https://api.example.org/graphql").unwrap())
//!     .uploads_base(UploadsBaseUrl::new("https://api.example.org").unwrap())
//!     .build();
//!
//! assert_eq!(config.endpoint().scheme(), "https");
//! ```
//!
//! ## Authentication
//!
//! The client reads the bearer token through a [`TokenProvider`] on every
//! request. A [`SessionStore`] is the usual provider:
//!
//! ```rust
//! use std::sync::Arc;
//! use charity_admin::{BearerToken, ConsoleConfig, GraphqlClient, SessionStore, StaffProfile, StaffRole};
//!
//! let session = Arc::new(SessionStore::new());
//! let client = GraphqlClient::new(&ConsoleConfig::default(), session.clone());
//!
//! session.login(
//!     BearerToken::new("token-from-login").unwrap(),
//!     StaffProfile::new("amina@example.org", "Amina", StaffRole::Admin),
//! );
//! assert!(session.is_authenticated());
//! # drop(client);
//! ```
//!
//! ## Uploading Files
//!
//! Files are tagged explicitly in [`Variables`]. Any file switches the request
//! to `multipart/form-data`:
//!
//! ```rust,ignore
//! use charity_admin::{FileUpload, Variables};
//! use serde_json::json;
//!
//! let variables = Variables::new()
//!     .with("title", json!("Spring appeal"))
//!     .with("images", vec![
//!         FileUpload::new("a.jpg", a_bytes).with_mime_type("image/jpeg"),
//!         FileUpload::new("b.png", b_bytes).with_mime_type("image/png"),
//!     ]);
//!
//! let data = client
//!     .execute("mutation($title: String!, $images: [Upload!]!) { createPost(title: $title, images: $images) { id } }", &variables)
//!     .await?;
//! ```
//!
//! ## Handling Errors
//!
//! ```rust,ignore
//! use charity_admin::admin::staff;
//! use charity_admin::GraphqlErrorKind;
//!
//! match staff::register(&client, &new_member).await {
//!     Ok(id) => println!("created {id}"),
//!     Err(e) if e.kind() == GraphqlErrorKind::Duplicate => {
//!         println!("This email is already registered to another user.");
//!     }
//!     Err(e) => println!("{e}"),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and session are passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No retries**: Failures surface to the caller unchanged

pub mod admin;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod gallery;

// Re-export public types at crate root for convenience
pub use auth::{BearerToken, SessionStore, StaffProfile, StaffRole, StaticToken, TokenProvider};
pub use config::{ConsoleConfig, ConsoleConfigBuilder, GraphqlEndpoint, UploadsBaseUrl};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    FileUpload, GraphqlClient, GraphqlError, GraphqlErrorKind, HttpError, HttpResponse,
    NonJsonResponseError, VariableValue, Variables,
};
