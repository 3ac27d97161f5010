//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireEditor`] -- Requires permission to create and edit.
//! - [`rbac::RequireAdmin`] -- Requires permission to delete.

pub mod auth;
pub mod rbac;
