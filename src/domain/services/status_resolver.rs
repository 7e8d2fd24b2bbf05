//! Store open/closed resolution.
//!
//! Rules are applied in strict precedence, the first applicable one decides:
//! manual override, then holiday special hours, then regular weekly hours.

use crate::domain::entities::{
    DayOfWeek, DaySchedule, HolidayBanner, NextOpen, StatusKind, StoreConfig, StoreStatus,
    TimeOfDay, WeeklySchedule,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub const MANUALLY_CLOSED_MESSAGE: &str = "Store is currently closed";
pub const SPECIAL_HOURS_OPEN_MESSAGE: &str = "Open with special hours";
pub const CLOSED_TODAY_MESSAGE: &str = "Closed for today";
pub const OPEN_MESSAGE: &str = "Open";
pub const CLOSED_MESSAGE: &str = "Closed";

/// How many days past today the next-open search looks
const NEXT_OPEN_LOOKAHEAD_DAYS: usize = 6;

/// Decide whether the store is open at `now` (store-local wall-clock time)
pub fn resolve_status(config: &StoreConfig, now: NaiveDateTime) -> StoreStatus {
    let today = DayOfWeek::from_weekday(now.weekday());
    let time = TimeOfDay::from_naive_time(&now.time());

    let status = if !config.manual_open {
        StoreStatus::closed(StatusKind::ManuallyClosed, MANUALLY_CLOSED_MESSAGE)
    } else if let Some(status) = holiday_status(&config.holiday_banners, now.date(), time) {
        status
    } else {
        regular_status(&config.schedule, today, time)
    };

    status.at(today, time)
}

fn holiday_status(banners: &[HolidayBanner], date: NaiveDate, time: TimeOfDay) -> Option<StoreStatus> {
    let (banner, special) = banners
        .iter()
        .filter(|banner| banner.is_live_on(date))
        .find_map(|banner| banner.special_hours_on(date).map(|special| (banner, special)))?;

    let closed_message = format!("Closed for {}", banner.title);

    let mut status = if special.is_closed {
        StoreStatus::closed(StatusKind::HolidayClosed, closed_message)
    } else {
        let Some(range) = special.time_range() else {
            tracing::warn!(
                "Ignoring special hours for '{}' on {}: open/close are not valid HH:MM times",
                banner.title,
                date
            );
            return None;
        };

        if range.contains(time) {
            StoreStatus::open(StatusKind::HolidayOpen, SPECIAL_HOURS_OPEN_MESSAGE)
        } else {
            StoreStatus::closed(StatusKind::HolidayClosed, closed_message)
        }
    };

    status.holiday_title = Some(banner.title.clone());
    status.special_hours = Some(special.clone());
    Some(status)
}

fn regular_status(schedule: &WeeklySchedule, today: DayOfWeek, time: TimeOfDay) -> StoreStatus {
    let Some(day) = schedule.get(today).filter(|day| !day.is_closed) else {
        return StoreStatus::closed(StatusKind::RegularClosed, CLOSED_TODAY_MESSAGE);
    };

    if day.ranges.iter().any(|range| range.contains(time)) {
        return StoreStatus::open(StatusKind::RegularOpen, OPEN_MESSAGE);
    }

    let mut status = StoreStatus::closed(StatusKind::RegularClosed, CLOSED_MESSAGE);
    status.next_open = next_open(schedule, day, time);
    status
}

/// Next opening: a later range today, otherwise the first open day within the lookahead
pub fn next_open(schedule: &WeeklySchedule, today: &DaySchedule, time: TimeOfDay) -> Option<NextOpen> {
    if let Some(range) = today.ranges.iter().find(|range| range.open > time) {
        return Some(NextOpen {
            day: today.day,
            time: range.open,
            message: format!("Opens at {} today", range.open),
        });
    }

    (1..=NEXT_OPEN_LOOKAHEAD_DAYS)
        .map(|offset| today.day.plus_days(offset))
        .filter_map(|day| schedule.get(day))
        .filter(|day| !day.is_closed)
        .find_map(|day| {
            day.ranges.first().map(|range| NextOpen {
                day: day.day,
                time: range.open,
                message: format!("Opens at {} on {}", range.open, day.day),
            })
        })
}
