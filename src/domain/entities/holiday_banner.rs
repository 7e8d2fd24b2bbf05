use super::schedule::TimeRange;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Named override window layered above the regular weekly hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayBanner {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub special_hours: Vec<SpecialHourOverride>,
    pub created_at: String,
    pub updated_at: String,
}

impl HolidayBanner {
    pub fn new(
        title: String,
        message: String,
        image_url: Option<String>,
        is_active: bool,
        start_date: NaiveDate,
        end_date: NaiveDate,
        special_hours: Vec<SpecialHourOverride>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            message,
            image_url,
            is_active,
            start_date,
            end_date,
            special_hours,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Case-insensitive identity of a banner within the banner list
    pub fn title_key(title: &str) -> String {
        title.trim().to_lowercase()
    }

    /// Whether `date` falls inside `[start_date, end_date]`
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_live_on(&self, date: NaiveDate) -> bool {
        self.is_active && self.covers(date)
    }

    /// First special-hour entry for the given calendar day
    pub fn special_hours_on(&self, date: NaiveDate) -> Option<&SpecialHourOverride> {
        self.special_hours.iter().find(|hours| hours.date == date)
    }
}

/// Single-day exception inside a banner's window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialHourOverride {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
    #[serde(default)]
    pub is_closed: bool,
}

impl SpecialHourOverride {
    pub fn closed(date: NaiveDate) -> Self {
        Self {
            date,
            open: None,
            close: None,
            is_closed: true,
        }
    }

    /// The override's hours, or `None` when either endpoint is missing or malformed
    pub fn time_range(&self) -> Option<TimeRange> {
        TimeRange::parse(self.open.as_deref()?, self.close.as_deref()?)
    }
}

/// DTO for adding or replacing a holiday banner
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertHolidayBannerRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub special_hours: Vec<SpecialHourRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialHourRequest {
    pub date: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
    pub is_closed: Option<bool>,
}

/// Query for the national-holiday seeding endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedHolidaysQuery {
    pub year: Option<i32>,
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp; only the calendar day is kept
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
