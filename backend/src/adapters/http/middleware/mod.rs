//! HTTP middleware for axum.
//!
//! - `auth` - Session resolution middleware and role extractors

pub mod auth;

pub use auth::{auth_middleware, CurrentUser, RequireAdmin, RequireAuth, RequireSubscriber};
