//! Reservation ledger model: holds and confirmed entries.

use serde::Serialize;
use sqlx::FromRow;
use tournoi_core::availability::counts_against_capacity;
use tournoi_core::confirmation::LedgerEntry;
use tournoi_core::types::{DbId, Timestamp};
use uuid::Uuid;

/// A row from the `entries` table.
///
/// An unconfirmed row is a hold owned by `session_id` until `expires_at`;
/// a confirmed row holds its seat until soft-deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entry {
    pub id: DbId,
    pub band_id: DbId,
    pub member_id: DbId,
    pub session_id: Uuid,
    pub expires_at: Timestamp,
    pub confirmed: bool,
    pub confirmed_at: Option<Timestamp>,
    pub confirmed_by: Option<DbId>,
    pub created_by: Option<DbId>,
    pub deleted_at: Option<Timestamp>,
    pub deleted_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entry {
    /// Whether this entry takes a seat at `now`. Only meaningful for rows
    /// that are not soft-deleted.
    pub fn counts_against_capacity(&self, now: Timestamp) -> bool {
        counts_against_capacity(self.confirmed, self.expires_at, now)
    }

    pub fn to_ledger(&self) -> LedgerEntry {
        LedgerEntry {
            id: self.id,
            band_id: self.band_id,
            session_id: self.session_id,
            confirmed: self.confirmed,
            expires_at: self.expires_at,
        }
    }
}

/// Input for placing a hold.
#[derive(Debug, Clone)]
pub struct NewHold {
    pub band_id: DbId,
    pub member_id: DbId,
    pub session_id: Uuid,
    pub expires_at: Timestamp,
    pub created_by: DbId,
}
