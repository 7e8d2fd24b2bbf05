use crate::{
    domain::entities::{TimingsResponse, UpdateTimingsRequest},
    infrastructure::http::middleware::{ApiError, ApiResult, AppState},
};
use axum::{extract::State, Json};

pub async fn get_timings(State(state): State<AppState>) -> ApiResult<Json<TimingsResponse>> {
    let timings = state.store_hours_service.get_timings().await?;
    Ok(Json(TimingsResponse::new(timings)))
}

/// Accepts `{timings: [...]}`, `{timings: {...}}` or the bare array/map
pub async fn update_timings(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<TimingsResponse>> {
    let request: UpdateTimingsRequest = serde_json::from_value(body).map_err(|_| {
        ApiError::BadRequest(
            "timings must be an array of day records or an object keyed by day".to_string(),
        )
    })?;

    let timings = state.store_hours_service.update_timings(request).await?;
    Ok(Json(TimingsResponse::new(timings)))
}
