//! Authentication primitives.
//!
//! Login is by emailed one-time code (see `handlers::auth`); the session is
//! carried by a [`jwt`] access token.

pub mod jwt;
