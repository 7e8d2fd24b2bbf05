use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::application::services::{HolidayBannerService, StoreHoursService};
use crate::infrastructure::http::middleware::error::ApiError;

pub const ADMIN_KEY_HEADER: &str = "X-API-Key";

#[derive(Clone)]
pub struct AppState {
    pub store_hours_service: StoreHoursService,
    pub holiday_banner_service: HolidayBannerService,
    /// Shared secret for mutating routes; `None` leaves them open
    pub admin_api_key: Option<Arc<str>>,
}

fn extract_admin_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn keys_match(expected: &str, provided: &str) -> bool {
    let expected = expected.as_bytes();
    let provided = provided.as_bytes();
    if expected.len() != provided.len() {
        return false;
    }
    expected
        .iter()
        .zip(provided)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Guards routes that change the store configuration
pub async fn require_admin_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.admin_api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let verdict = extract_admin_key(request.headers()).map(|provided| keys_match(expected, provided));

    match verdict {
        Some(true) => Ok(next.run(request).await),
        Some(false) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request with invalid admin key"
            );
            Err(ApiError::Forbidden("Invalid API key".to_string()))
        }
        None => Err(ApiError::Unauthorized),
    }
}
