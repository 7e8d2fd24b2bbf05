use crate::domain::entities::{HolidayBanner, StoreConfigRecord, WeeklySchedule};
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

/// Storage boundary for the singleton store record, its weekly hours and holiday banners
#[async_trait]
pub trait StoreConfigRepository: Send + Sync {
    /// Read the store record, creating the default (all days closed) when none exists
    async fn get_or_create_store_config(&self, default_store_name: &str) -> ApiResult<StoreConfigRecord>;

    /// Atomically replace all seven day records; on failure the previous week stays intact
    async fn replace_weekly_schedule(&self, schedule: &WeeklySchedule) -> ApiResult<()>;

    async fn update_store_info(&self, store_name: Option<&str>, manual_open: Option<bool>) -> ApiResult<()>;

    async fn list_holiday_banners(&self) -> ApiResult<Vec<HolidayBanner>>;

    async fn get_holiday_banner_by_title(&self, title: &str) -> ApiResult<Option<HolidayBanner>>;

    /// Insert, or replace the banner whose title matches case-insensitively
    async fn upsert_holiday_banner(&self, banner: &HolidayBanner) -> ApiResult<()>;

    /// Insert only when no banner with the same title exists; returns whether it was inserted
    async fn insert_holiday_banner_if_absent(&self, banner: &HolidayBanner) -> ApiResult<bool>;

    async fn delete_holiday_banner(&self, title: &str) -> ApiResult<bool>;
}
