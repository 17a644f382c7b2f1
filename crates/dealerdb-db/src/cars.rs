//! Read queries over `car_makes` and `car_models`.

use sqlx::PgPool;

use crate::DbError;

/// One model joined with its make.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CarModelRow {
    pub make_id: i64,
    pub make_name: String,
    pub make_description: String,
    pub model_id: i64,
    pub model_name: String,
    pub car_type: String,
    pub year: i32,
}

/// Returns every model with its make, ordered by make name, model name, year.
///
/// Makes with no models are omitted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_car_models(pool: &PgPool) -> Result<Vec<CarModelRow>, DbError> {
    let rows = sqlx::query_as::<_, CarModelRow>(
        "SELECT mk.id AS make_id, mk.name AS make_name, mk.description AS make_description, \
                md.id AS model_id, md.name AS model_name, md.car_type, md.year \
         FROM car_models md \
         JOIN car_makes mk ON mk.id = md.car_make_id \
         ORDER BY mk.name, md.name, md.year",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
