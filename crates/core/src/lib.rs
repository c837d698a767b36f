//! Domain rules for tournament registration.
//!
//! Everything here is pure and database-agnostic so the repository layer,
//! the HTTP handlers, and the unit tests share one definition of
//! eligibility, capacity, and entry limits.

pub mod availability;
pub mod bands;
pub mod confirmation;
pub mod entry_limits;
pub mod error;
pub mod otp;
pub mod players;
pub mod search;
pub mod types;
