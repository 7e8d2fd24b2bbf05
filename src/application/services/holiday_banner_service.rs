use crate::{
    domain::entities::{
        parse_calendar_date, HolidayBanner, SpecialHourOverride, SpecialHourRequest, TimeRange,
        UpsertHolidayBannerRequest,
    },
    domain::ports::{clock::Clock, store_config_repository::StoreConfigRepository},
    domain::services::{national_holidays, proposed_banner},
    infrastructure::http::middleware::error::{ApiError, ApiResult},
};
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use std::sync::Arc;

const MIN_SEED_YEAR: i32 = 1900;
const MAX_SEED_YEAR: i32 = 2999;

#[derive(Clone)]
pub struct HolidayBannerService {
    store_repo: Arc<dyn StoreConfigRepository>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl HolidayBannerService {
    pub fn new(store_repo: Arc<dyn StoreConfigRepository>, clock: Arc<dyn Clock>, timezone: Tz) -> Self {
        Self {
            store_repo,
            clock,
            timezone,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.timezone).date_naive()
    }

    pub async fn list_banners(&self) -> ApiResult<Vec<HolidayBanner>> {
        self.store_repo.list_holiday_banners().await
    }

    /// Banners that are switched on and whose window covers today
    pub async fn active_banners(&self) -> ApiResult<Vec<HolidayBanner>> {
        let today = self.today();
        let banners = self.store_repo.list_holiday_banners().await?;
        Ok(banners
            .into_iter()
            .filter(|banner| banner.is_live_on(today))
            .collect())
    }

    /// Add a banner, or replace the one with the same title (case-insensitive)
    pub async fn upsert_banner(&self, request: UpsertHolidayBannerRequest) -> ApiResult<HolidayBanner> {
        let mut banner = validate_banner(request)?;

        if let Some(existing) = self.store_repo.get_holiday_banner_by_title(&banner.title).await? {
            banner.id = existing.id;
            banner.created_at = existing.created_at;
        }

        self.store_repo.upsert_holiday_banner(&banner).await?;
        Ok(banner)
    }

    pub async fn delete_banner(&self, title: &str) -> ApiResult<()> {
        if !self.store_repo.delete_holiday_banner(title).await? {
            return Err(ApiError::NotFound(format!("Holiday banner '{}' not found", title)));
        }
        Ok(())
    }

    /// Propose the national holidays of `year` as inactive banners.
    /// Titles already present are left alone; returns only the banners created.
    pub async fn seed_national_holidays(&self, year: Option<i32>) -> ApiResult<Vec<HolidayBanner>> {
        let year = year.unwrap_or_else(|| self.today().year());
        if !(MIN_SEED_YEAR..=MAX_SEED_YEAR).contains(&year) {
            return Err(ApiError::BadRequest(format!(
                "year must be between {} and {}",
                MIN_SEED_YEAR, MAX_SEED_YEAR
            )));
        }

        let mut created = Vec::new();
        for holiday in national_holidays(year) {
            let banner = proposed_banner(&holiday);
            if self.store_repo.insert_holiday_banner_if_absent(&banner).await? {
                created.push(banner);
            } else {
                tracing::debug!("Holiday banner '{}' already exists, skipping", holiday.name);
            }
        }

        tracing::info!("Seeded {} national holiday banners for {}", created.len(), year);
        Ok(created)
    }
}

fn required(value: Option<String>, field: &str) -> ApiResult<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}

fn required_date(value: Option<String>, field: &str) -> ApiResult<NaiveDate> {
    let value = required(value, field)?;
    parse_calendar_date(&value)
        .ok_or_else(|| ApiError::BadRequest(format!("{} must be a date (YYYY-MM-DD)", field)))
}

fn validate_special_hour(request: SpecialHourRequest) -> ApiResult<SpecialHourOverride> {
    let date = required_date(request.date, "specialHours.date")?;

    if request.is_closed.unwrap_or(false) {
        return Ok(SpecialHourOverride::closed(date));
    }

    let open = required(request.open, "specialHours.open")?;
    let close = required(request.close, "specialHours.close")?;
    if TimeRange::parse(&open, &close).is_none() {
        return Err(ApiError::BadRequest(format!(
            "Special hours on {} must use HH:MM times",
            date
        )));
    }

    Ok(SpecialHourOverride {
        date,
        open: Some(open),
        close: Some(close),
        is_closed: false,
    })
}

fn validate_banner(request: UpsertHolidayBannerRequest) -> ApiResult<HolidayBanner> {
    let title = required(request.title, "title")?;
    let message = required(request.message, "message")?;
    let start_date = required_date(request.start_date, "startDate")?;
    let end_date = required_date(request.end_date, "endDate")?;

    if start_date > end_date {
        return Err(ApiError::BadRequest(
            "startDate must not be after endDate".to_string(),
        ));
    }

    let special_hours = request
        .special_hours
        .into_iter()
        .map(validate_special_hour)
        .collect::<ApiResult<Vec<_>>>()?;

    let image_url = request
        .image_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    Ok(HolidayBanner::new(
        title,
        message,
        image_url,
        // Posted banners apply unless explicitly disabled; only seeded proposals start inactive
        request.is_active.unwrap_or(true),
        start_date,
        end_date,
        special_hours,
    ))
}
