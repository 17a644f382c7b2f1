//! Database operations for the `dealers` table.

use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `dealers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DealerRow {
    pub id: i64,
    pub city: String,
    pub state: String,
    pub st: String,
    pub address: String,
    pub zip: String,
    pub lat: f64,
    pub long: f64,
    pub short_name: String,
    pub full_name: String,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all dealers ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_dealers(pool: &PgPool) -> Result<Vec<DealerRow>, DbError> {
    let rows = sqlx::query_as::<_, DealerRow>(
        "SELECT id, city, state, st, address, zip, lat, long, short_name, full_name \
         FROM dealers \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns dealers whose two-letter state abbreviation matches `st`,
/// compared case-insensitively.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_dealers_by_state(pool: &PgPool, st: &str) -> Result<Vec<DealerRow>, DbError> {
    let rows = sqlx::query_as::<_, DealerRow>(
        "SELECT id, city, state, st, address, zip, lat, long, short_name, full_name \
         FROM dealers \
         WHERE st = UPPER($1) \
         ORDER BY id",
    )
    .bind(st)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single dealer by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_dealer(pool: &PgPool, id: i64) -> Result<Option<DealerRow>, DbError> {
    let row = sqlx::query_as::<_, DealerRow>(
        "SELECT id, city, state, st, address, zip, lat, long, short_name, full_name \
         FROM dealers \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
