use super::holiday_banner::{HolidayBanner, SpecialHourOverride};
use super::schedule::{DayOfWeek, DayRecord, StoredDay, TimeOfDay, WeeklySchedule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Singleton store record as read from storage, before the schedule is re-validated
#[derive(Debug, Clone)]
pub struct StoreConfigRecord {
    pub store_name: String,
    pub manual_open: bool,
    pub timings: Vec<StoredDay>,
    pub holiday_banners: Vec<HolidayBanner>,
    pub last_updated: String,
    pub created_at: String,
}

/// Everything the status resolver needs to decide whether the store is open
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub store_name: String,
    pub schedule: WeeklySchedule,
    pub holiday_banners: Vec<HolidayBanner>,
    /// Operator-controlled flag; `false` forces the store closed
    pub manual_open: bool,
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    ManuallyClosed,
    HolidayOpen,
    HolidayClosed,
    RegularOpen,
    RegularClosed,
    Unknown,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::ManuallyClosed => "manually_closed",
            StatusKind::HolidayOpen => "holiday_open",
            StatusKind::HolidayClosed => "holiday_closed",
            StatusKind::RegularOpen => "regular_open",
            StatusKind::RegularClosed => "regular_closed",
            StatusKind::Unknown => "unknown",
        }
    }
}

/// When the store next opens, relative to the moment the status was computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextOpen {
    pub day: DayOfWeek,
    pub time: TimeOfDay,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub is_open: bool,
    pub message: String,
    pub status: StatusKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_hours: Option<SpecialHourOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_open: Option<NextOpen>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_time: Option<TimeOfDay>,
}

impl StoreStatus {
    pub fn open(status: StatusKind, message: impl Into<String>) -> Self {
        Self::new(true, status, message)
    }

    pub fn closed(status: StatusKind, message: impl Into<String>) -> Self {
        Self::new(false, status, message)
    }

    fn new(is_open: bool, status: StatusKind, message: impl Into<String>) -> Self {
        Self {
            is_open,
            message: message.into(),
            status,
            holiday_title: None,
            special_hours: None,
            next_open: None,
            today: None,
            current_time: None,
        }
    }

    /// Status reported when no store configuration could be obtained
    pub fn unknown() -> Self {
        Self::closed(StatusKind::Unknown, "Store status unknown")
    }

    pub fn at(mut self, today: DayOfWeek, current_time: TimeOfDay) -> Self {
        self.today = Some(today);
        self.current_time = Some(current_time);
        self
    }
}

/// DTO for updating the store profile and manual open flag
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreInfoRequest {
    pub store_name: Option<String>,
    pub is_open: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfoResponse {
    pub store_name: String,
    pub is_open: bool,
    pub last_updated: String,
    pub timings: BTreeMap<DayOfWeek, DayRecord>,
    pub holiday_banners: Vec<HolidayBanner>,
}

/// `{success: true, data: ...}` envelope used by the timing endpoints
#[derive(Debug, Clone, Serialize)]
pub struct TimingsResponse {
    pub success: bool,
    pub data: BTreeMap<DayOfWeek, DayRecord>,
}

impl TimingsResponse {
    pub fn new(data: BTreeMap<DayOfWeek, DayRecord>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
