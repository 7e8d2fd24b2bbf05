use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storefront::application::services::{HolidayBannerService, StoreHoursService, StoreSettings};
use storefront::bootstrap::build_services;
use storefront::domain::entities::{
    HolidayBanner, StoreConfigRecord, UpdateTimingsRequest, WeeklySchedule,
};
use storefront::domain::ports::clock::Clock;
use storefront::domain::ports::store_config_repository::StoreConfigRepository;
use storefront::infrastructure::http::middleware::error::ApiResult;
use storefront::infrastructure::persistence::Database;

/// Clock pinned to an instant that tests can move
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// `value` is `YYYY-MM-DD HH:MM`, interpreted as UTC
    pub fn at(value: &str) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(parse_utc(value)),
        })
    }

    pub fn set(&self, value: &str) {
        *self.now.lock().unwrap() = parse_utc(value);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

fn parse_utc(value: &str) -> DateTime<Utc> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").expect("bad test instant");
    Utc.from_utc_datetime(&naive)
}

pub fn test_settings() -> StoreSettings {
    StoreSettings {
        timezone: chrono_tz::UTC,
        update_timeout: Duration::from_millis(2000),
        ..StoreSettings::default()
    }
}

pub fn services_for(
    db: &Database,
    clock: Arc<FixedClock>,
) -> (StoreHoursService, HolidayBannerService) {
    services_with(Arc::new(db.clone()), clock, test_settings())
}

pub fn services_with(
    repo: Arc<dyn StoreConfigRepository>,
    clock: Arc<FixedClock>,
    settings: StoreSettings,
) -> (StoreHoursService, HolidayBannerService) {
    build_services(repo, clock, settings)
}

/// A full week, every day open 09:00-17:00
pub fn regular_week() -> Value {
    json!([
        {"day": "monday", "open": "09:00", "close": "17:00"},
        {"day": "tuesday", "open": "09:00", "close": "17:00"},
        {"day": "wednesday", "open": "09:00", "close": "17:00"},
        {"day": "thursday", "open": "09:00", "close": "17:00"},
        {"day": "friday", "open": "09:00", "close": "17:00"},
        {"day": "saturday", "open": "09:00", "close": "17:00"},
        {"day": "sunday", "open": "09:00", "close": "17:00"}
    ])
}

pub fn timings_request(value: Value) -> UpdateTimingsRequest {
    serde_json::from_value(value).expect("invalid timings payload in test")
}

/// Repository wrapper whose schedule replace takes longer than any test timeout
pub struct SlowReplaceRepository {
    pub inner: Database,
    pub delay: Duration,
}

#[async_trait]
impl StoreConfigRepository for SlowReplaceRepository {
    async fn get_or_create_store_config(&self, default_store_name: &str) -> ApiResult<StoreConfigRecord> {
        self.inner.get_or_create_store_config(default_store_name).await
    }

    async fn replace_weekly_schedule(&self, schedule: &WeeklySchedule) -> ApiResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.replace_weekly_schedule(schedule).await
    }

    async fn update_store_info(&self, store_name: Option<&str>, manual_open: Option<bool>) -> ApiResult<()> {
        self.inner.update_store_info(store_name, manual_open).await
    }

    async fn list_holiday_banners(&self) -> ApiResult<Vec<HolidayBanner>> {
        self.inner.list_holiday_banners().await
    }

    async fn get_holiday_banner_by_title(&self, title: &str) -> ApiResult<Option<HolidayBanner>> {
        self.inner.get_holiday_banner_by_title(title).await
    }

    async fn upsert_holiday_banner(&self, banner: &HolidayBanner) -> ApiResult<()> {
        self.inner.upsert_holiday_banner(banner).await
    }

    async fn insert_holiday_banner_if_absent(&self, banner: &HolidayBanner) -> ApiResult<bool> {
        self.inner.insert_holiday_banner_if_absent(banner).await
    }

    async fn delete_holiday_banner(&self, title: &str) -> ApiResult<bool> {
        self.inner.delete_holiday_banner(title).await
    }
}
