//! Reservation engine.
//!
//! The only code that writes the `entries` table. Each operation runs as a
//! single database transaction:
//!
//! - [`availability`] computes live capacity for a member's eligible bands
//!   and places a fresh batch of holds under a new session id.
//! - [`confirmation`] reconciles a member's desired band set against the
//!   ledger and converts the session's holds into confirmed entries.

pub mod availability;
pub mod confirmation;

use sqlx::PgConnection;
use tournoi_core::error::CoreError;
use tournoi_core::types::DbId;
use tournoi_db::models::member::Member;
use tournoi_db::repositories::MemberRepo;

use crate::error::AppResult;

pub use availability::{compute_availability, AvailabilityReport, BandAvailability};
pub use confirmation::{confirm_entries, ConfirmationOutcome};

/// The authenticated caller on whose behalf the engine acts.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub user_id: DbId,
    pub is_admin: bool,
}

impl Principal {
    /// Owner restriction for member lookups: admins see every member.
    pub fn owner_filter(&self) -> Option<DbId> {
        if self.is_admin {
            None
        } else {
            Some(self.user_id)
        }
    }
}

/// Load a member the principal may act on, or 404.
pub(crate) async fn resolve_member(
    conn: &mut PgConnection,
    principal: Principal,
    member_id: DbId,
) -> AppResult<Member> {
    MemberRepo::find_visible(conn, member_id, principal.owner_filter())
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Member",
                id: member_id,
            }
            .into()
        })
}
