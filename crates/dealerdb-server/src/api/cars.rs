use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct CarItem {
    pub make_id: i64,
    pub model_id: i64,
    pub car_make: String,
    pub car_make_description: String,
    pub car_model: String,
    pub car_year: i32,
    pub car_type: String,
}

/// GET /api/v1/cars: every model with its make.
pub(super) async fn list_cars(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CarItem>>>, ApiError> {
    let rows = dealerdb_db::list_car_models(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| CarItem {
            make_id: row.make_id,
            model_id: row.model_id,
            car_make: row.make_name,
            car_make_description: row.make_description,
            car_model: row.model_name,
            car_year: row.year,
            car_type: row.car_type,
        })
        .collect();

    Ok(Json(ApiResponse::new(req_id.0, data)))
}
