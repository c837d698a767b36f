//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts, where the entity is created
//!   through the API

pub mod band;
pub mod entry;
pub mod entry_event;
pub mod member;
pub mod otp;
pub mod user;
