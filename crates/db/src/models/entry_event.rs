//! Audit log of confirmed entries being created and removed.

use serde::Serialize;
use sqlx::FromRow;
use tournoi_core::types::{DbId, Timestamp};

/// Kind of ledger event. Stored as TEXT in `entry_events.event_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEventType {
    /// An entry was confirmed.
    Created,
    /// A confirmed entry was soft-deleted.
    Deleted,
}

impl EntryEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryEventType::Created => "created",
            EntryEventType::Deleted => "deleted",
        }
    }
}

/// One line of a member's entry history, joined with the band name and the
/// acting account's admin flag.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryHistoryItem {
    pub band_id: DbId,
    pub band_name: String,
    pub event_time: Timestamp,
    pub event_type: String,
    pub event_by: Option<DbId>,
    pub event_by_is_admin: bool,
}
