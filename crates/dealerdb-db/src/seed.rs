use dealerdb_core::{InventoryFile, SentimentLabel};
use sqlx::PgPool;

use crate::DbError;

/// Row counts touched by [`seed_inventory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub makes: usize,
    pub models: usize,
    pub dealers: usize,
    /// Reviews actually inserted; ones already present are skipped.
    pub reviews_inserted: usize,
}

/// Upsert makes, models and dealers from the inventory file and insert its
/// sample reviews.
///
/// All writes run inside a single transaction; if any operation fails the
/// entire batch is rolled back. Makes upsert by name, models by
/// `(make, name, year)`, dealers by id. A sample review is inserted only if
/// no review by the same author exists for that dealer, and its sentiment
/// comes from `classify` at insert time.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_inventory<F>(
    pool: &PgPool,
    inventory: &InventoryFile,
    classify: F,
) -> Result<SeedSummary, DbError>
where
    F: Fn(&str) -> SentimentLabel,
{
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for make in &inventory.makes {
        let make_id: i64 = sqlx::query_scalar(
            "INSERT INTO car_makes (name, description) \
             VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET \
                 description = EXCLUDED.description, \
                 updated_at = NOW() \
             RETURNING id",
        )
        .bind(&make.name)
        .bind(&make.description)
        .fetch_one(&mut *tx)
        .await?;
        summary.makes += 1;

        for model in &make.models {
            sqlx::query(
                "INSERT INTO car_models (car_make_id, name, car_type, year) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (car_make_id, name, year) DO UPDATE SET \
                     car_type = EXCLUDED.car_type, \
                     updated_at = NOW()",
            )
            .bind(make_id)
            .bind(&model.name)
            .bind(model.car_type.to_string())
            .bind(model.year)
            .execute(&mut *tx)
            .await?;
            summary.models += 1;
        }
    }

    for dealer in &inventory.dealers {
        sqlx::query(
            "INSERT INTO dealers (id, city, state, st, address, zip, lat, long, short_name, full_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (id) DO UPDATE SET \
                 city = EXCLUDED.city, \
                 state = EXCLUDED.state, \
                 st = EXCLUDED.st, \
                 address = EXCLUDED.address, \
                 zip = EXCLUDED.zip, \
                 lat = EXCLUDED.lat, \
                 long = EXCLUDED.long, \
                 short_name = EXCLUDED.short_name, \
                 full_name = EXCLUDED.full_name, \
                 updated_at = NOW()",
        )
        .bind(dealer.id)
        .bind(&dealer.city)
        .bind(&dealer.state)
        .bind(&dealer.st)
        .bind(&dealer.address)
        .bind(&dealer.zip)
        .bind(dealer.lat)
        .bind(dealer.long)
        .bind(&dealer.short_name)
        .bind(&dealer.full_name)
        .execute(&mut *tx)
        .await?;
        summary.dealers += 1;
    }

    if !inventory.dealers.is_empty() {
        // Explicit ids bypass the sequence; move it past them so later inserts don't collide.
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('dealers', 'id'), \
                           (SELECT COALESCE(MAX(id), 1) FROM dealers))",
        )
        .execute(&mut *tx)
        .await?;
    }

    for review in &inventory.reviews {
        let sentiment = classify(&review.review);
        let result = sqlx::query(
            "INSERT INTO dealer_reviews \
                 (dealer_id, name, review, purchase, purchase_date, car_make, car_model, car_year, sentiment) \
             SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9 \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM dealer_reviews WHERE dealer_id = $1 AND name = $2 \
             )",
        )
        .bind(review.dealership)
        .bind(&review.name)
        .bind(&review.review)
        .bind(review.purchase)
        .bind(review.purchase_date)
        .bind(&review.car_make)
        .bind(&review.car_model)
        .bind(review.car_year)
        .bind(sentiment.as_str())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() > 0 {
            summary.reviews_inserted += 1;
        }
    }

    tx.commit().await?;
    Ok(summary)
}
