use crate::infrastructure::http::controllers::{holiday_banners, store_info, store_timings};
use crate::infrastructure::http::middleware::{require_admin_key, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Request bodies above this size are rejected before reaching a handler
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Routes that change the store configuration
    let protected = Router::new()
        .route(
            "/api/store-info",
            put(store_info::update_store_info),
        )
        .route(
            "/api/store-info/timings",
            put(store_timings::update_timings).post(store_timings::update_timings),
        )
        .route(
            "/api/store-info/holiday-banners",
            post(holiday_banners::upsert_holiday_banner),
        )
        .route(
            "/api/store-info/holiday-banners/seed",
            post(holiday_banners::seed_holiday_banners),
        )
        .route(
            "/api/store-info/holiday-banners/:title",
            delete(holiday_banners::delete_holiday_banner),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin_key,
        ));

    // Build public routes
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/store-info", get(store_info::get_store_info))
        .route("/api/store-info/status", get(store_info::get_store_status))
        .route("/api/store-info/timings", get(store_timings::get_timings))
        .route(
            "/api/store-info/holiday-banners",
            get(holiday_banners::list_holiday_banners),
        )
        .route(
            "/api/store-info/holiday-banners/active",
            get(holiday_banners::list_active_holiday_banners),
        )
        .merge(protected)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "OK"
}
