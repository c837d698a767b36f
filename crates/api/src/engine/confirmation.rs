//! Confirmation Coordinator.
//!
//! Reconciles a member's desired band set against the ledger in one
//! transaction. Any failure rolls the whole request back: no entry is
//! removed or confirmed unless every desired band ends up confirmed.

use chrono::Utc;
use sqlx::PgPool;
use tournoi_core::bands::BandSlot;
use tournoi_core::confirmation::{dedupe_ids, plan_confirmation, LedgerEntry};
use tournoi_core::entry_limits::validate_entry_limits;
use tournoi_core::error::CoreError;
use tournoi_core::types::DbId;
use tournoi_db::models::entry::Entry;
use tournoi_db::models::entry_event::EntryEventType;
use tournoi_db::models::member::Member;
use tournoi_db::repositories::{BandRepo, EntryEventRepo, EntryRepo};
use uuid::Uuid;

use super::{resolve_member, Principal};
use crate::error::AppResult;

/// What a successful confirmation changed.
#[derive(Debug)]
pub struct ConfirmationOutcome {
    pub member: Member,
    /// Holds that became confirmed entries.
    pub confirmed: Vec<Entry>,
    /// Active entries removed because their band was no longer desired.
    pub removed: Vec<Entry>,
}

/// Make `band_ids` the member's exact set of confirmed entries, confirming
/// the holds placed under `session_id`.
///
/// Fails with 404 when the member is not visible to the principal or a band
/// id is unknown or ineligible, with an entry-limit conflict when the set
/// breaks a per-day rule, and with a session-expired conflict when a desired
/// band has neither a confirmed entry nor a live hold of this session.
pub async fn confirm_entries(
    pool: &PgPool,
    principal: Principal,
    member_id: DbId,
    band_ids: &[DbId],
    session_id: Uuid,
) -> AppResult<ConfirmationOutcome> {
    let desired = dedupe_ids(band_ids);
    let mut tx = pool.begin().await?;

    let member = resolve_member(&mut *tx, principal, member_id).await?;
    let sex = member.member_sex()?;

    // --- Eligibility ---
    let mut bands = Vec::new();
    for band in BandRepo::find_by_ids(&mut *tx, &desired).await? {
        if band.admits(sex, member.points)? {
            bands.push(band);
        }
    }
    let missing: Vec<DbId> = desired
        .iter()
        .copied()
        .filter(|id| !bands.iter().any(|b| b.id == *id))
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::NotFoundMany {
            entity: "Band",
            ids: missing,
        }
        .into());
    }

    // --- Limits, over the full set in request order ---
    let slots = desired
        .iter()
        .filter_map(|id| bands.iter().find(|b| b.id == *id))
        .map(|b| b.slot())
        .collect::<Result<Vec<BandSlot>, CoreError>>()?;
    validate_entry_limits(&slots).map_err(CoreError::from)?;

    // --- Reconcile ---
    let entries = EntryRepo::lock_active_for_member(&mut *tx, member.id).await?;
    let (kept, dropped): (Vec<Entry>, Vec<Entry>) = entries
        .into_iter()
        .partition(|e| desired.contains(&e.band_id));

    let dropped_ids: Vec<DbId> = dropped.iter().map(|e| e.id).collect();
    let removed = EntryRepo::soft_delete_many(&mut *tx, &dropped_ids, principal.user_id).await?;
    let removed_confirmed: Vec<Entry> = removed.iter().filter(|e| e.confirmed).cloned().collect();
    EntryEventRepo::record(
        &mut *tx,
        EntryEventType::Deleted,
        &removed_confirmed,
        principal.user_id,
    )
    .await?;

    let ledger: Vec<LedgerEntry> = kept.iter().map(Entry::to_ledger).collect();
    let to_confirm = plan_confirmation(&ledger, &desired, session_id, Utc::now())?;

    let confirmed = EntryRepo::confirm_many(&mut *tx, &to_confirm, principal.user_id).await?;
    if confirmed.len() != to_confirm.len() {
        return Err(CoreError::SessionExpired.into());
    }
    EntryEventRepo::record(
        &mut *tx,
        EntryEventType::Created,
        &confirmed,
        principal.user_id,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        member_id = member.id,
        %session_id,
        desired = desired.len(),
        confirmed = confirmed.len(),
        removed = removed.len(),
        actor_id = principal.user_id,
        "Entries confirmed"
    );

    Ok(ConfirmationOutcome {
        member,
        confirmed,
        removed,
    })
}
