//! Capacity arithmetic for band availability.
//!
//! An entry counts against capacity while it is active: not soft-deleted,
//! and either confirmed or held with `expires_at` in the future. Expiry is
//! lazy; nothing evicts stale holds, every count applies the filter.

use std::collections::HashMap;

use crate::types::{DbId, Timestamp};

/// Default lifetime of a hold in minutes.
pub const DEFAULT_ENTRY_HOLD_MINS: i64 = 10;

/// Longest hold a deployment may configure: one day.
pub const MAX_ENTRY_HOLD_MINS: i64 = 24 * 60;

/// Remaining seats and overflow for one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub available: i64,
    pub waiting: i64,
}

/// Compute availability for a band of `max_entries` seats given the number
/// of active entries currently counted against it.
pub fn capacity(max_entries: i32, active_count: i64) -> Capacity {
    let max_entries = i64::from(max_entries);
    Capacity {
        available: (max_entries - active_count).max(0),
        waiting: (active_count - max_entries).max(0),
    }
}

/// Whether an entry counts against capacity at `now`.
pub fn counts_against_capacity(confirmed: bool, expires_at: Timestamp, now: Timestamp) -> bool {
    confirmed || expires_at > now
}

/// Tally active entries per band.
///
/// Every id in `band_ids` is present in the result, with zero when no entry
/// references it; entries for bands outside `band_ids` are ignored.
pub fn count_by_band(
    band_ids: &[DbId],
    entry_band_ids: impl IntoIterator<Item = DbId>,
) -> HashMap<DbId, i64> {
    let mut counts: HashMap<DbId, i64> = band_ids.iter().map(|&id| (id, 0)).collect();
    for band_id in entry_band_ids {
        if let Some(count) = counts.get_mut(&band_id) {
            *count += 1;
        }
    }
    counts
}
