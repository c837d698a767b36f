//! Repository for the `entries` table (the reservation ledger).
//!
//! Rows are never hard-deleted. Every mutation here runs on a connection
//! borrowed from a caller-owned transaction; only the availability,
//! confirmation and member-deletion transactions write entries.

use sqlx::PgConnection;
use tournoi_core::types::DbId;

use crate::models::entry::{Entry, NewHold};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, band_id, member_id, session_id, expires_at, confirmed, \
    confirmed_at, confirmed_by, created_by, deleted_at, deleted_by, created_at, updated_at";

/// Ledger reads and transactional mutations.
pub struct EntryRepo;

impl EntryRepo {
    // -----------------------------------------------------------------------
    // Availability
    // -----------------------------------------------------------------------

    /// Lock and return every non-deleted entry in `band_ids`, expired holds
    /// included. Callers keep the rows for which
    /// [`Entry::counts_against_capacity`] holds.
    pub async fn lock_active_for_bands(
        conn: &mut PgConnection,
        band_ids: &[DbId],
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries \
             WHERE band_id = ANY($1) AND deleted_at IS NULL \
             ORDER BY id \
             FOR UPDATE"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(band_ids)
            .fetch_all(conn)
            .await
    }

    /// Soft-delete the member's unconfirmed holds in `band_ids`.
    ///
    /// Expired holds are included: they no longer count, but an active row
    /// would make the following idempotent insert a no-op.
    pub async fn supersede_holds(
        conn: &mut PgConnection,
        member_id: DbId,
        band_ids: &[DbId],
        actor_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE entries SET deleted_at = NOW(), deleted_by = $3 \
             WHERE member_id = $1 AND band_id = ANY($2) \
               AND confirmed = false AND deleted_at IS NULL",
        )
        .bind(member_id)
        .bind(band_ids)
        .bind(actor_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Place a hold unless the member already has an active entry in the
    /// band. Returns `None` for the no-op case.
    pub async fn insert_hold(
        conn: &mut PgConnection,
        hold: &NewHold,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries (band_id, member_id, session_id, expires_at, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (band_id, member_id) WHERE deleted_at IS NULL DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(hold.band_id)
            .bind(hold.member_id)
            .bind(hold.session_id)
            .bind(hold.expires_at)
            .bind(hold.created_by)
            .fetch_optional(conn)
            .await
    }

    // -----------------------------------------------------------------------
    // Confirmation
    // -----------------------------------------------------------------------

    /// Lock and return every active entry of a member, ordered by id.
    pub async fn lock_active_for_member(
        conn: &mut PgConnection,
        member_id: DbId,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries \
             WHERE member_id = $1 AND deleted_at IS NULL \
             ORDER BY id \
             FOR UPDATE"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(member_id)
            .fetch_all(conn)
            .await
    }

    /// Soft-delete the given active entries, stamping `actor_id`.
    /// Returns the rows as they are after the update.
    pub async fn soft_delete_many(
        conn: &mut PgConnection,
        ids: &[DbId],
        actor_id: DbId,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "UPDATE entries SET deleted_at = NOW(), deleted_by = $2 \
             WHERE id = ANY($1) AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(ids)
            .bind(actor_id)
            .fetch_all(conn)
            .await
    }

    /// Mark the given active holds confirmed by `actor_id`.
    /// Returns the rows as they are after the update.
    pub async fn confirm_many(
        conn: &mut PgConnection,
        ids: &[DbId],
        actor_id: DbId,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "UPDATE entries SET confirmed = true, confirmed_at = NOW(), confirmed_by = $2 \
             WHERE id = ANY($1) AND deleted_at IS NULL AND confirmed = false \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(ids)
            .bind(actor_id)
            .fetch_all(conn)
            .await
    }
}
