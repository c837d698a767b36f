//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `tournoi_db` or to the
//! reservation [`engine`](crate::engine) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod bands;
pub mod entries;
pub mod members;
pub mod players;
