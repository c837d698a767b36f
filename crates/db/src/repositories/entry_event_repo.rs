//! Repository for the `entry_events` audit log.

use sqlx::{PgConnection, PgPool};
use tournoi_core::types::DbId;

use crate::models::entry::Entry;
use crate::models::entry_event::{EntryEventType, EntryHistoryItem};

/// Appends and projects ledger events.
pub struct EntryEventRepo;

impl EntryEventRepo {
    /// Append one event per entry, attributed to `actor_id`.
    ///
    /// Must run in the same transaction as the ledger change it describes.
    pub async fn record(
        conn: &mut PgConnection,
        event_type: EntryEventType,
        entries: &[Entry],
        actor_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        if entries.is_empty() {
            return Ok(0);
        }
        let entry_ids: Vec<DbId> = entries.iter().map(|e| e.id).collect();
        let band_ids: Vec<DbId> = entries.iter().map(|e| e.band_id).collect();
        let member_ids: Vec<DbId> = entries.iter().map(|e| e.member_id).collect();

        let result = sqlx::query(
            "INSERT INTO entry_events (entry_id, band_id, member_id, event_type, actor_id) \
             SELECT t.entry_id, t.band_id, t.member_id, $4, $5 \
             FROM UNNEST($1::BIGINT[], $2::BIGINT[], $3::BIGINT[]) \
                  AS t(entry_id, band_id, member_id)",
        )
        .bind(&entry_ids)
        .bind(&band_ids)
        .bind(&member_ids)
        .bind(event_type.as_str())
        .bind(actor_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Chronological created/deleted feed for a member's confirmed entries.
    pub async fn history_for_member(
        pool: &PgPool,
        member_id: DbId,
    ) -> Result<Vec<EntryHistoryItem>, sqlx::Error> {
        sqlx::query_as::<_, EntryHistoryItem>(
            "SELECT ev.band_id, b.name AS band_name, ev.occurred_at AS event_time, \
                    ev.event_type, ev.actor_id AS event_by, \
                    COALESCE(u.is_admin, false) AS event_by_is_admin \
             FROM entry_events ev \
             JOIN bands b ON b.id = ev.band_id \
             LEFT JOIN users u ON u.id = ev.actor_id \
             WHERE ev.member_id = $1 \
             ORDER BY ev.occurred_at, ev.id",
        )
        .bind(member_id)
        .fetch_all(pool)
        .await
    }
}
