//! Reconciliation of a member's desired band set against their ledger.
//!
//! The coordinator in the API crate loads the member's remaining active
//! entries inside its transaction and hands them to [`plan_confirmation`],
//! which decides which holds to confirm or rejects the whole request.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// The fields of an active entry that confirmation depends on.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: DbId,
    pub band_id: DbId,
    pub session_id: Uuid,
    pub confirmed: bool,
    pub expires_at: Timestamp,
}

/// Collapse duplicate ids, keeping the first occurrence of each.
pub fn dedupe_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Decide which held entries to confirm so the member ends up entered in
/// exactly `desired`.
///
/// `entries` must be the member's active entries after entries for bands
/// outside `desired` were removed. Confirmed entries satisfy a band
/// regardless of session; holds satisfy it only when they belong to
/// `session_id` and have not expired at `now`.
///
/// Returns the entry ids to mark confirmed (possibly empty when everything
/// is already confirmed), or [`CoreError::SessionExpired`] when any desired
/// band lacks a live hold for this session.
pub fn plan_confirmation(
    entries: &[LedgerEntry],
    desired: &[DbId],
    session_id: Uuid,
    now: Timestamp,
) -> Result<Vec<DbId>, CoreError> {
    let mut confirmed_count = 0usize;
    let mut candidates: HashMap<DbId, &LedgerEntry> = HashMap::new();
    for entry in entries {
        if entry.confirmed {
            confirmed_count += 1;
            candidates.insert(entry.band_id, entry);
        } else if entry.session_id == session_id {
            candidates.insert(entry.band_id, entry);
        }
    }

    let mut to_confirm = Vec::new();
    for band_id in desired {
        let entry = candidates.get(band_id).ok_or(CoreError::SessionExpired)?;
        if !entry.confirmed && entry.expires_at > now {
            to_confirm.push(entry.id);
        }
    }

    // A hold that is present but already expired was skipped above; the
    // count no longer adds up and the cart is stale.
    if to_confirm.len() + confirmed_count != desired.len() {
        return Err(CoreError::SessionExpired);
    }

    Ok(to_confirm)
}
