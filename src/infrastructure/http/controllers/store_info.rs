use crate::{
    domain::entities::{StoreInfoResponse, StoreStatus, UpdateStoreInfoRequest},
    infrastructure::http::middleware::{ApiResult, AppState},
};
use axum::{extract::State, Json};

pub async fn get_store_info(State(state): State<AppState>) -> ApiResult<Json<StoreInfoResponse>> {
    let info = state.store_hours_service.get_store_info().await?;
    Ok(Json(info))
}

pub async fn update_store_info(
    State(state): State<AppState>,
    Json(request): Json<UpdateStoreInfoRequest>,
) -> ApiResult<Json<StoreInfoResponse>> {
    let info = state.store_hours_service.update_store_info(request).await?;
    Ok(Json(info))
}

pub async fn get_store_status(State(state): State<AppState>) -> Json<StoreStatus> {
    Json(state.store_hours_service.get_status().await)
}
