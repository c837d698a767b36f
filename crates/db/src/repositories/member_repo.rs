//! Repository for the `members` table.

use sqlx::{PgConnection, PgPool};
use tournoi_core::types::DbId;

use crate::models::member::{CreateMember, Member, MemberEntrySummary, MemberFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, permit_id, first_name, last_name, sex, points, category, \
    club_name, permit_type, notified_at, created_at, updated_at";

/// Same columns qualified with the `m` alias for joined queries.
const M_COLUMNS: &str = "m.id, m.user_id, m.permit_id, m.first_name, m.last_name, m.sex, \
    m.points, m.category, m.club_name, m.permit_type, m.notified_at, m.created_at, m.updated_at";

/// Shared WHERE clause for list and count. Binds: $1 owner, $2 pattern,
/// $3 permit id, $4 whether the pattern also matches the owner's email.
const FILTER: &str = "m.deleted_at IS NULL \
    AND ($1::BIGINT IS NULL OR m.user_id = $1) \
    AND ($2::TEXT IS NULL \
         OR m.last_name ILIKE $2 OR m.first_name ILIKE $2 OR m.club_name ILIKE $2 \
         OR ($4 AND u.email ILIKE $2)) \
    AND ($3::TEXT IS NULL OR m.permit_id = $3)";

/// Provides CRUD operations for members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateMember,
    ) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members \
                (user_id, permit_id, first_name, last_name, sex, points, \
                 category, club_name, permit_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .bind(&input.permit_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.sex.as_str())
            .bind(input.points)
            .bind(&input.category)
            .bind(&input.club_name)
            .bind(&input.permit_type)
            .fetch_one(pool)
            .await
    }

    /// Find an active member by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active member visible to a principal: any member when
    /// `owner_id` is `None` (admin), otherwise only the owner's.
    pub async fn find_visible(
        conn: &mut PgConnection,
        id: DbId,
        owner_id: Option<DbId>,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM members \
             WHERE id = $1 AND deleted_at IS NULL \
               AND ($2::BIGINT IS NULL OR user_id = $2)"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(conn)
            .await
    }

    /// List members matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &MemberFilter,
        include_email_search: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {M_COLUMNS} FROM members m \
             JOIN users u ON u.id = m.user_id \
             WHERE {FILTER} \
             ORDER BY m.created_at DESC, m.id DESC \
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(filter.owner_id)
            .bind(&filter.search_pattern)
            .bind(&filter.permit_id)
            .bind(include_email_search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count members matching `filter`.
    pub async fn count(
        pool: &PgPool,
        filter: &MemberFilter,
        include_email_search: bool,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM members m \
             JOIN users u ON u.id = m.user_id \
             WHERE {FILTER}"
        );
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(filter.owner_id)
            .bind(&filter.search_pattern)
            .bind(&filter.permit_id)
            .bind(include_email_search)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Confirmed entries of the given members with their rank in each band.
    ///
    /// Ranks are computed over every confirmed entry in the band, ordered by
    /// confirmation time with the entry id as tie-break.
    pub async fn list_confirmed_entries(
        pool: &PgPool,
        member_ids: &[DbId],
    ) -> Result<Vec<MemberEntrySummary>, sqlx::Error> {
        sqlx::query_as::<_, MemberEntrySummary>(
            "SELECT r.member_id, r.band_id, b.name AS band_name, b.price AS band_price, \
                    b.max_entries AS band_max_entries, r.band_rank, r.confirmed_at \
             FROM ( \
                 SELECT e.member_id, e.band_id, e.confirmed_at, \
                        ROW_NUMBER() OVER ( \
                            PARTITION BY e.band_id ORDER BY e.confirmed_at ASC, e.id ASC \
                        ) AS band_rank \
                 FROM entries e \
                 WHERE e.confirmed = true AND e.deleted_at IS NULL \
             ) r \
             JOIN bands b ON b.id = r.band_id \
             WHERE r.member_id = ANY($1) \
             ORDER BY r.member_id, b.id",
        )
        .bind(member_ids)
        .fetch_all(pool)
        .await
    }

    /// Soft-delete a member, stamping `actor_id`.
    pub async fn soft_delete(
        conn: &mut PgConnection,
        id: DbId,
        actor_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE members SET deleted_at = NOW(), deleted_by = $2 \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(actor_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record that the first-confirmation email went out.
    ///
    /// Returns `true` only for the call that flipped `notified_at` from NULL,
    /// so concurrent confirmations send at most one email.
    pub async fn mark_notified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE members SET notified_at = NOW() \
             WHERE id = $1 AND notified_at IS NULL AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Email address of the account owning a member.
    pub async fn owner_email(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT u.email FROM members m JOIN users u ON u.id = m.user_id WHERE m.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(email,)| email))
    }
}
