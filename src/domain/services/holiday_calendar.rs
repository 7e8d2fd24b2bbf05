use crate::domain::entities::{HolidayBanner, SpecialHourOverride};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Banners for seeded holidays start showing this many days ahead of the holiday
pub const BANNER_LEAD_DAYS: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalHoliday {
    pub name: &'static str,
    pub date: NaiveDate,
}

enum HolidayRule {
    Fixed { month: u32, day: u32 },
    NthWeekday { month: u32, weekday: Weekday, n: u8 },
    LastWeekday { month: u32, weekday: Weekday },
}

static US_FEDERAL_HOLIDAYS: [(&str, HolidayRule); 11] = [
    ("New Year's Day", HolidayRule::Fixed { month: 1, day: 1 }),
    (
        "Martin Luther King, Jr.'s Birthday",
        HolidayRule::NthWeekday { month: 1, weekday: Weekday::Mon, n: 3 },
    ),
    (
        "Washington's Birthday",
        HolidayRule::NthWeekday { month: 2, weekday: Weekday::Mon, n: 3 },
    ),
    ("Memorial Day", HolidayRule::LastWeekday { month: 5, weekday: Weekday::Mon }),
    ("Juneteenth National Independence Day", HolidayRule::Fixed { month: 6, day: 19 }),
    ("Independence Day", HolidayRule::Fixed { month: 7, day: 4 }),
    ("Labor Day", HolidayRule::NthWeekday { month: 9, weekday: Weekday::Mon, n: 1 }),
    ("Columbus Day", HolidayRule::NthWeekday { month: 10, weekday: Weekday::Mon, n: 2 }),
    ("Veterans Day", HolidayRule::Fixed { month: 11, day: 11 }),
    ("Thanksgiving Day", HolidayRule::NthWeekday { month: 11, weekday: Weekday::Thu, n: 4 }),
    ("Christmas Day", HolidayRule::Fixed { month: 12, day: 25 }),
];

impl HolidayRule {
    fn date_in(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            HolidayRule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            HolidayRule::NthWeekday { month, weekday, n } => {
                NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
            }
            HolidayRule::LastWeekday { month, weekday } => {
                let first_of_next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)?
                };
                let last = first_of_next.pred_opt()?;
                let back = (7 + last.weekday().num_days_from_monday()
                    - weekday.num_days_from_monday())
                    % 7;
                last.checked_sub_signed(Duration::days(back as i64))
            }
        }
    }
}

/// US federal holidays observed on their calendar dates in `year`
pub fn national_holidays(year: i32) -> Vec<NationalHoliday> {
    US_FEDERAL_HOLIDAYS
        .iter()
        .filter_map(|(name, rule)| {
            rule.date_in(year).map(|date| NationalHoliday { name: *name, date })
        })
        .collect()
}

/// Proposed banner for a holiday: inactive until an operator turns it on,
/// shown from `BANNER_LEAD_DAYS` before the holiday, closed on the day itself.
pub fn proposed_banner(holiday: &NationalHoliday) -> HolidayBanner {
    let start_date = holiday
        .date
        .checked_sub_signed(Duration::days(BANNER_LEAD_DAYS))
        .unwrap_or(holiday.date);

    HolidayBanner::new(
        holiday.name.to_string(),
        format!(
            "We will be closed on {} for {}.",
            holiday.date.format("%A, %B %-d"),
            holiday.name
        ),
        None,
        false,
        start_date,
        holiday.date,
        vec![SpecialHourOverride::closed(holiday.date)],
    )
}
