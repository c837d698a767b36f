//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated account from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires an admin account.

pub mod auth;
pub mod rbac;
