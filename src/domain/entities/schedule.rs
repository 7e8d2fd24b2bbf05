use chrono::{NaiveTime, Timelike, Weekday};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// The day `offset` days after this one, wrapping around the week
    pub fn plus_days(&self, offset: usize) -> Self {
        Self::ALL[(self.index() + offset) % 7]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" => Ok(DayOfWeek::Monday),
            "tuesday" => Ok(DayOfWeek::Tuesday),
            "wednesday" => Ok(DayOfWeek::Wednesday),
            "thursday" => Ok(DayOfWeek::Thursday),
            "friday" => Ok(DayOfWeek::Friday),
            "saturday" => Ok(DayOfWeek::Saturday),
            "sunday" => Ok(DayOfWeek::Sunday),
            _ => Err(format!("Invalid day: {}", s)),
        }
    }
}

/// Wall-clock time as minutes since midnight, exchanged as zero-padded `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(23 * 60 + 59);

    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(TimeOfDay((hours * 60 + minutes) as u16))
    }

    /// Parse a strict 24-hour `HH:MM` string
    pub fn parse(value: &str) -> Option<Self> {
        static TIME_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = TIME_REGEX.get_or_init(|| {
            Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("Invalid time-of-day regex")
        });

        let caps = re.captures(value)?;
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        Self::from_hm(hours, minutes)
    }

    pub fn from_naive_time(time: &NaiveTime) -> Self {
        TimeOfDay((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid time format: {}. Expected HH:MM", s))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Open interval of a day; `close < open` means the range runs past midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
}

impl TimeRange {
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Self {
        Self { open, close }
    }

    pub fn all_day() -> Self {
        Self::new(TimeOfDay::MIDNIGHT, TimeOfDay::LAST_MINUTE)
    }

    pub fn parse(open: &str, close: &str) -> Option<Self> {
        Some(Self::new(TimeOfDay::parse(open)?, TimeOfDay::parse(close)?))
    }

    pub fn is_overnight(&self) -> bool {
        self.close < self.open
    }

    /// Inclusive containment, wrapping through midnight for overnight ranges
    pub fn contains(&self, time: TimeOfDay) -> bool {
        if self.is_overnight() {
            time >= self.open || time <= self.close
        } else {
            self.open <= time && time <= self.close
        }
    }
}

/// Canonical hours for one weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: DayOfWeek,
    pub is_closed: bool,
    pub ranges: Vec<TimeRange>,
}

impl DaySchedule {
    pub fn closed(day: DayOfWeek) -> Self {
        Self {
            day,
            is_closed: true,
            ranges: Vec::new(),
        }
    }

    pub fn all_day(day: DayOfWeek) -> Self {
        Self::open(day, vec![TimeRange::all_day()])
    }

    /// Open day; ranges are sorted by opening time, ties keep their input order
    pub fn open(day: DayOfWeek, mut ranges: Vec<TimeRange>) -> Self {
        ranges.sort_by_key(|range| range.open);
        Self {
            day,
            is_closed: false,
            ranges,
        }
    }

    /// Backward-compatible `(open, close)` pair: first range's open, last range's close
    pub fn summary(&self) -> (TimeOfDay, TimeOfDay) {
        if self.is_closed {
            return (TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT);
        }
        match (self.ranges.first(), self.ranges.last()) {
            (Some(first), Some(last)) => (first.open, last.close),
            _ => (TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT),
        }
    }

    pub fn to_record(&self) -> DayRecord {
        let (open, close) = self.summary();
        DayRecord {
            day: self.day.to_string(),
            is_closed: self.is_closed,
            open: open.to_string(),
            close: close.to_string(),
            split_hours: self
                .ranges
                .iter()
                .map(|range| TimeRangeRecord {
                    open: Some(range.open.to_string()),
                    close: Some(range.close.to_string()),
                })
                .collect(),
        }
    }
}

/// One schedule entry per weekday
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: BTreeMap<DayOfWeek, DaySchedule>,
}

impl WeeklySchedule {
    pub fn from_days(days: BTreeMap<DayOfWeek, DaySchedule>) -> Self {
        Self { days }
    }

    /// Default schedule for a freshly created store: every day closed
    pub fn all_closed() -> Self {
        Self {
            days: DayOfWeek::ALL
                .iter()
                .map(|day| (*day, DaySchedule::closed(*day)))
                .collect(),
        }
    }

    pub fn get(&self, day: DayOfWeek) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DaySchedule> {
        self.days.values()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        DayOfWeek::ALL.iter().all(|day| self.days.contains_key(day))
    }

    pub fn to_records(&self) -> BTreeMap<DayOfWeek, DayRecord> {
        self.days
            .iter()
            .map(|(day, schedule)| (*day, schedule.to_record()))
            .collect()
    }
}

/// Persisted and transmitted shape of a day: `{day, isClosed, open, close, splitHours}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub day: String,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub open: String,
    #[serde(default)]
    pub close: String,
    #[serde(default)]
    pub split_hours: Vec<TimeRangeRecord>,
}

/// A day row read back from storage; `Unreadable` when one of its columns could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredDay {
    Record(DayRecord),
    Unreadable { day: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeRecord {
    #[serde(default, deserialize_with = "lenient_time_text", skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    #[serde(default, deserialize_with = "lenient_time_text", skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
}

/// Accept any JSON value for a time field. Non-strings keep their JSON text and fail
/// `HH:MM` validation in the normalizer instead of failing the whole payload.
pub(crate) fn lenient_time_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

impl TimeRangeRecord {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: Some(open.to_string()),
            close: Some(close.to_string()),
        }
    }

    pub fn parse(&self) -> Option<TimeRange> {
        TimeRange::parse(self.open.as_deref()?, self.close.as_deref()?)
    }
}
