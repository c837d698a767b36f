//! Per-day business limits on the set of bands a member is entered in.
//!
//! Evaluated over the member's full desired band set on every confirmation,
//! not just the bands being added, so a re-submitted compliant set always
//! passes and a non-compliant one never does.

use std::collections::HashMap;

use crate::bands::{BandColor, BandSlot};

/// Maximum number of bands a member may enter on one day.
pub const MAX_BANDS_PER_DAY: usize = 3;

/// Maximum number of bands of one color a member may enter on one day.
pub const MAX_BANDS_PER_COLOR_PER_DAY: usize = 1;

/// The first limit a candidate band set breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntryLimitViolation {
    #[error("limit of three bands per day reached")]
    BandsPerDay { day: i16 },

    #[error("limit of one band per color per day reached")]
    ColorPerDay { day: i16, color: BandColor },
}

impl EntryLimitViolation {
    /// Stable machine-readable code surfaced to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            EntryLimitViolation::BandsPerDay { .. } => "BAND_LIMIT_PER_DAY",
            EntryLimitViolation::ColorPerDay { .. } => "BAND_COLOR_PER_DAY",
        }
    }
}

/// Check a candidate band set against both per-day limits in one pass.
///
/// Slots are visited in input order; the first element that pushes a counter
/// over its threshold determines the error. On a single element the day
/// limit is checked before the color limit.
pub fn validate_entry_limits(slots: &[BandSlot]) -> Result<(), EntryLimitViolation> {
    let mut per_day: HashMap<i16, usize> = HashMap::new();
    let mut per_color: HashMap<BandSlot, usize> = HashMap::new();

    for slot in slots {
        let day_count = per_day.entry(slot.day).or_default();
        *day_count += 1;
        if *day_count > MAX_BANDS_PER_DAY {
            return Err(EntryLimitViolation::BandsPerDay { day: slot.day });
        }

        let color_count = per_color.entry(*slot).or_default();
        *color_count += 1;
        if *color_count > MAX_BANDS_PER_COLOR_PER_DAY {
            return Err(EntryLimitViolation::ColorPerDay {
                day: slot.day,
                color: slot.color,
            });
        }
    }

    Ok(())
}
