//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Reads for display accept `&PgPool`; methods that participate in the
//! reservation transactions accept `&mut PgConnection` so the caller owns
//! the transaction boundary.

pub mod band_repo;
pub mod entry_event_repo;
pub mod entry_repo;
pub mod member_repo;
pub mod otp_repo;
pub mod user_repo;

pub use band_repo::BandRepo;
pub use entry_event_repo::EntryEventRepo;
pub use entry_repo::EntryRepo;
pub use member_repo::MemberRepo;
pub use otp_repo::OtpRepo;
pub use user_repo::UserRepo;
