//! Repository for the `bands` table.

use sqlx::{PgConnection, PgPool};
use tournoi_core::types::DbId;

use crate::models::band::{Band, CreateBand};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, day, color, sex, max_points, max_entries, price, created_at, updated_at";

/// Provides catalog reads and band row locks.
pub struct BandRepo;

impl BandRepo {
    /// Insert a new band, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBand) -> Result<Band, sqlx::Error> {
        let query = format!(
            "INSERT INTO bands (name, day, color, sex, max_points, max_entries, price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Band>(&query)
            .bind(&input.name)
            .bind(input.day)
            .bind(input.color.as_str())
            .bind(input.sex.as_str())
            .bind(input.max_points)
            .bind(input.max_entries)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    /// Find a band by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Band>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bands WHERE id = $1");
        sqlx::query_as::<_, Band>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bands, optionally restricted to one day. Ordered by id.
    pub async fn list(pool: &PgPool, day: Option<i16>) -> Result<Vec<Band>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bands \
             WHERE ($1::SMALLINT IS NULL OR day = $1) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Band>(&query)
            .bind(day)
            .fetch_all(pool)
            .await
    }

    /// The whole catalog, ordered by id, read on the caller's connection.
    ///
    /// Eligibility is decided by the caller with [`Band::admits`].
    pub async fn list_all(conn: &mut PgConnection) -> Result<Vec<Band>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bands ORDER BY id");
        sqlx::query_as::<_, Band>(&query).fetch_all(conn).await
    }

    /// The bands among `ids` that exist, ordered by id.
    pub async fn find_by_ids(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<Band>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bands WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Band>(&query)
            .bind(ids)
            .fetch_all(conn)
            .await
    }

    /// Take exclusive row locks on the given bands, in id order.
    ///
    /// Held until the surrounding transaction ends. Two availability
    /// computations touching a common band serialize here, which also
    /// covers holds inserted after the entry rows were read. Acquiring in id
    /// order keeps overlapping band sets deadlock-free.
    pub async fn lock(conn: &mut PgConnection, ids: &[DbId]) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT id FROM bands WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(ids)
            .fetch_all(conn)
            .await?;
        Ok(())
    }
}
