use crate::{
    domain::entities::{HolidayBanner, SeedHolidaysQuery, UpsertHolidayBannerRequest},
    infrastructure::http::middleware::{ApiResult, AppState},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

pub async fn list_holiday_banners(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<HolidayBanner>>> {
    let banners = state.holiday_banner_service.list_banners().await?;
    Ok(Json(banners))
}

pub async fn list_active_holiday_banners(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<HolidayBanner>>> {
    let banners = state.holiday_banner_service.active_banners().await?;
    Ok(Json(banners))
}

pub async fn upsert_holiday_banner(
    State(state): State<AppState>,
    Json(request): Json<UpsertHolidayBannerRequest>,
) -> ApiResult<Json<HolidayBanner>> {
    let banner = state.holiday_banner_service.upsert_banner(request).await?;
    Ok(Json(banner))
}

pub async fn delete_holiday_banner(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<StatusCode> {
    state.holiday_banner_service.delete_banner(&title).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn seed_holiday_banners(
    State(state): State<AppState>,
    Query(query): Query<SeedHolidaysQuery>,
) -> ApiResult<(StatusCode, Json<Vec<HolidayBanner>>)> {
    let created = state
        .holiday_banner_service
        .seed_national_holidays(query.year)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
