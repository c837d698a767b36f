//! Availability Calculator.
//!
//! Counting and hold placement happen in one transaction:
//!
//! 1. Select the eligible bands from the catalog and lock their rows in id
//!    order. Concurrent calls touching a common band queue here.
//! 2. Supersede the member's own unconfirmed holds in those bands.
//! 3. Lock the remaining entries and count those still taking a seat.
//! 4. Insert one hold per band under a fresh session id, skipping bands
//!    where the member already has an active entry.
//!
//! The hold lands before the counts are returned, so the next viewer of a
//! nearly full band already sees it taken.

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tournoi_core::availability::{capacity, count_by_band};
use tournoi_core::types::DbId;
use tournoi_db::models::band::Band;
use tournoi_db::models::entry::NewHold;
use tournoi_db::repositories::{BandRepo, EntryRepo};
use uuid::Uuid;

use super::{resolve_member, Principal};
use crate::error::{AppError, AppResult};

/// Live capacity of one eligible band.
#[derive(Debug, Clone, Serialize)]
pub struct BandAvailability {
    pub band: Band,
    pub available: i64,
    pub waiting: i64,
}

/// Result of an availability computation: every eligible band, ordered by
/// id, and the session that now holds a seat in each.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReport {
    pub bands: Vec<BandAvailability>,
    pub session_id: Uuid,
}

/// Compute availability for `member_id` and place a fresh batch of holds
/// lasting `hold_duration`.
pub async fn compute_availability(
    pool: &PgPool,
    principal: Principal,
    member_id: DbId,
    hold_duration: Duration,
) -> AppResult<AvailabilityReport> {
    let mut tx = pool.begin().await?;

    let member = resolve_member(&mut *tx, principal, member_id).await?;
    let sex = member.member_sex()?;

    let mut bands = Vec::new();
    for band in BandRepo::list_all(&mut *tx).await? {
        if band.admits(sex, member.points)? {
            bands.push(band);
        }
    }
    let band_ids: Vec<DbId> = bands.iter().map(|b| b.id).collect();

    BandRepo::lock(&mut *tx, &band_ids).await?;

    let superseded =
        EntryRepo::supersede_holds(&mut *tx, member.id, &band_ids, principal.user_id).await?;

    let now = Utc::now();
    let expires_at = now.checked_add_signed(hold_duration).ok_or_else(|| {
        AppError::InternalError(format!("hold duration {hold_duration} overflows"))
    })?;

    let locked = EntryRepo::lock_active_for_bands(&mut *tx, &band_ids).await?;
    let counts = count_by_band(
        &band_ids,
        locked
            .iter()
            .filter(|e| e.counts_against_capacity(now))
            .map(|e| e.band_id),
    );

    let session_id = Uuid::new_v4();
    let mut placed = 0usize;
    for band in &bands {
        let hold = NewHold {
            band_id: band.id,
            member_id: member.id,
            session_id,
            expires_at,
            created_by: principal.user_id,
        };
        if EntryRepo::insert_hold(&mut *tx, &hold).await?.is_some() {
            placed += 1;
        }
    }

    tx.commit().await?;

    tracing::info!(
        member_id = member.id,
        %session_id,
        eligible = bands.len(),
        superseded,
        placed,
        "Availability computed"
    );

    let bands = bands
        .into_iter()
        .map(|band| {
            let count = counts.get(&band.id).copied().unwrap_or(0);
            let cap = capacity(band.max_entries, count);
            BandAvailability {
                band,
                available: cap.available,
                waiting: cap.waiting,
            }
        })
        .collect();

    Ok(AvailabilityReport { bands, session_id })
}
