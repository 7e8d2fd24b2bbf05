use crate::domain::entities::{
    DayOfWeek, DaySchedule, DayTimingInput, StoredDay, TimeRange, TimingsPayload, WeeklySchedule,
};
use crate::domain::errors::{ScheduleError, ScheduleResult};
use std::collections::BTreeMap;
use std::fmt;

/// How malformed entries inside a non-empty `splitHours` list are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitHoursPolicy {
    /// Drop malformed pairs; the day fails only when none remain
    #[default]
    Lenient,
    /// Any malformed pair rejects the whole day
    Strict,
}

/// Problem found in stored schedule data; the affected day is treated as absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleAnomaly {
    UnknownDay(String),
    DuplicateDay(DayOfWeek),
    InvalidTiming { day: DayOfWeek, reason: String },
    DroppedRanges { day: DayOfWeek, count: usize },
}

impl fmt::Display for ScheduleAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleAnomaly::UnknownDay(token) => write!(f, "unknown day record '{}'", token),
            ScheduleAnomaly::DuplicateDay(day) => write!(f, "duplicate day record for {}", day),
            ScheduleAnomaly::InvalidTiming { day, reason } => {
                write!(f, "unreadable timing for {}: {}", day, reason)
            }
            ScheduleAnomaly::DroppedRanges { day, count } => {
                write!(f, "dropped {} malformed range(s) for {}", count, day)
            }
        }
    }
}

/// Converts client-submitted timing shapes into canonical `DaySchedule`s
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingNormalizer {
    policy: SplitHoursPolicy,
}

impl TimingNormalizer {
    pub fn new(policy: SplitHoursPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SplitHoursPolicy {
        self.policy
    }

    /// Normalize one day. The first matching shape wins:
    /// `is24Hours`, then `isClosed`, then a non-empty `splitHours`, then a single `open`/`close`.
    pub fn normalize_day(&self, day: DayOfWeek, input: &DayTimingInput) -> ScheduleResult<DaySchedule> {
        let (schedule, dropped) = self.normalize_day_counting(day, input)?;
        if dropped > 0 {
            tracing::debug!("Dropped {} malformed split-hour entries for {}", dropped, day);
        }
        Ok(schedule)
    }

    fn normalize_day_counting(
        &self,
        day: DayOfWeek,
        input: &DayTimingInput,
    ) -> ScheduleResult<(DaySchedule, usize)> {
        if input.is_24_hours == Some(true) {
            return Ok((DaySchedule::all_day(day), 0));
        }

        if input.is_closed == Some(true) {
            return Ok((DaySchedule::closed(day), 0));
        }

        if let Some(split_hours) = input.split_hours.as_ref().filter(|hours| !hours.is_empty()) {
            let mut ranges = Vec::with_capacity(split_hours.len());
            let mut dropped = 0;

            for (index, entry) in split_hours.iter().enumerate() {
                match entry.parse() {
                    Some(range) => ranges.push(range),
                    None if self.policy == SplitHoursPolicy::Strict => {
                        return Err(ScheduleError::InvalidTimingData {
                            day,
                            reason: format!("split hour #{} is not a valid HH:MM pair", index + 1),
                        });
                    }
                    None => dropped += 1,
                }
            }

            if ranges.is_empty() {
                return Err(ScheduleError::InvalidTimingData {
                    day,
                    reason: "none of the split hours is a valid HH:MM pair".to_string(),
                });
            }

            return Ok((DaySchedule::open(day, ranges), dropped));
        }

        if let (Some(open), Some(close)) = (input.open.as_deref(), input.close.as_deref()) {
            if let Some(range) = TimeRange::parse(open, close) {
                return Ok((DaySchedule::open(day, vec![range]), 0));
            }
        }

        Err(ScheduleError::InvalidTimingData {
            day,
            reason: "Must provide either is24Hours, isClosed, splitHours, or valid open/close times"
                .to_string(),
        })
    }

    /// Validate a full-week submission. Every day must appear exactly once;
    /// the first failure rejects the whole submission.
    pub fn normalize_week(&self, payload: TimingsPayload) -> ScheduleResult<WeeklySchedule> {
        let mut days = BTreeMap::new();

        for entry in payload.into_entries() {
            let token = entry.day.clone().unwrap_or_default();
            let day: DayOfWeek = token
                .parse()
                .map_err(|_| ScheduleError::InvalidDay(token.clone()))?;

            if days.contains_key(&day) {
                return Err(ScheduleError::DuplicateDay(day));
            }

            let schedule = self.normalize_day(day, &entry)?;
            days.insert(day, schedule);
        }

        if let Some(missing) = DayOfWeek::ALL.iter().find(|day| !days.contains_key(day)) {
            return Err(ScheduleError::MissingDay(*missing));
        }

        Ok(WeeklySchedule::from_days(days))
    }
}

/// Rebuild the weekly schedule from stored day records, best effort.
///
/// Stored rows go through the lenient normalizer again so legacy rows with an
/// empty `splitHours` but valid `open`/`close` still load. Unreadable rows are
/// skipped and reported; the day is then treated as closed by the resolver.
pub fn read_stored_schedule(rows: &[StoredDay]) -> (WeeklySchedule, Vec<ScheduleAnomaly>) {
    let normalizer = TimingNormalizer::new(SplitHoursPolicy::Lenient);
    let mut days = BTreeMap::new();
    let mut anomalies = Vec::new();

    for row in rows {
        let token = match row {
            StoredDay::Record(record) => &record.day,
            StoredDay::Unreadable { day, .. } => day,
        };
        let day: DayOfWeek = match token.parse() {
            Ok(day) => day,
            Err(_) => {
                anomalies.push(ScheduleAnomaly::UnknownDay(token.clone()));
                continue;
            }
        };

        if days.contains_key(&day) {
            anomalies.push(ScheduleAnomaly::DuplicateDay(day));
            continue;
        }

        let record = match row {
            StoredDay::Record(record) => record,
            StoredDay::Unreadable { reason, .. } => {
                anomalies.push(ScheduleAnomaly::InvalidTiming {
                    day,
                    reason: reason.clone(),
                });
                continue;
            }
        };

        match normalizer.normalize_day_counting(day, &DayTimingInput::from(record)) {
            Ok((schedule, dropped)) => {
                if dropped > 0 {
                    anomalies.push(ScheduleAnomaly::DroppedRanges { day, count: dropped });
                }
                days.insert(day, schedule);
            }
            Err(err) => anomalies.push(ScheduleAnomaly::InvalidTiming {
                day,
                reason: err.to_string(),
            }),
        }
    }

    (WeeklySchedule::from_days(days), anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DayRecord, TimeOfDay, TimeRangeRecord};

    fn t(value: &str) -> TimeOfDay {
        TimeOfDay::parse(value).unwrap()
    }

    fn input(day: &str) -> DayTimingInput {
        DayTimingInput::default().with_day(day)
    }

    fn full_week() -> Vec<DayTimingInput> {
        DayOfWeek::ALL
            .iter()
            .map(|day| DayTimingInput {
                open: Some("09:00".to_string()),
                close: Some("17:00".to_string()),
                ..input(day.as_str())
            })
            .collect()
    }

    #[test]
    fn test_24_hours_wins_over_stray_fields() {
        let normalizer = TimingNormalizer::default();
        let schedule = normalizer
            .normalize_day(
                DayOfWeek::Wednesday,
                &DayTimingInput {
                    is_24_hours: Some(true),
                    is_closed: Some(true),
                    open: Some("09:00".to_string()),
                    close: Some("10:00".to_string()),
                    ..input("wednesday")
                },
            )
            .unwrap();

        assert!(!schedule.is_closed);
        assert_eq!(schedule.ranges, vec![TimeRange::all_day()]);
    }

    #[test]
    fn test_closed_day_ignores_hours() {
        let normalizer = TimingNormalizer::default();
        let schedule = normalizer
            .normalize_day(
                DayOfWeek::Sunday,
                &DayTimingInput {
                    is_closed: Some(true),
                    split_hours: Some(vec![TimeRangeRecord::new("08:00", "12:00")]),
                    ..input("sunday")
                },
            )
            .unwrap();

        assert!(schedule.is_closed);
        assert!(schedule.ranges.is_empty());
        assert_eq!(schedule.summary(), (TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT));
    }

    #[test]
    fn test_split_hours_are_sorted_and_malformed_pairs_dropped() {
        let normalizer = TimingNormalizer::default();
        let schedule = normalizer
            .normalize_day(
                DayOfWeek::Monday,
                &DayTimingInput {
                    split_hours: Some(vec![
                        TimeRangeRecord::new("20:30", "23:59"),
                        TimeRangeRecord::new("25:00", "26:00"),
                        TimeRangeRecord {
                            open: Some("12:00".to_string()),
                            close: None,
                        },
                        TimeRangeRecord::new("00:00", "13:00"),
                    ]),
                    ..input("monday")
                },
            )
            .unwrap();

        assert_eq!(
            schedule.ranges,
            vec![
                TimeRange::new(t("00:00"), t("13:00")),
                TimeRange::new(t("20:30"), t("23:59")),
            ]
        );
    }

    #[test]
    fn test_split_hours_sort_is_stable_on_ties() {
        let normalizer = TimingNormalizer::default();
        let schedule = normalizer
            .normalize_day(
                DayOfWeek::Friday,
                &DayTimingInput {
                    split_hours: Some(vec![
                        TimeRangeRecord::new("10:00", "12:00"),
                        TimeRangeRecord::new("10:00", "11:00"),
                    ]),
                    ..input("friday")
                },
            )
            .unwrap();

        assert_eq!(schedule.ranges[0].close, t("12:00"));
        assert_eq!(schedule.ranges[1].close, t("11:00"));
    }

    #[test]
    fn test_strict_policy_rejects_any_malformed_pair() {
        let normalizer = TimingNormalizer::new(SplitHoursPolicy::Strict);
        let result = normalizer.normalize_day(
            DayOfWeek::Monday,
            &DayTimingInput {
                split_hours: Some(vec![
                    TimeRangeRecord::new("08:00", "12:00"),
                    TimeRangeRecord::new("13:00", "nope"),
                ]),
                ..input("monday")
            },
        );

        assert!(matches!(
            result,
            Err(ScheduleError::InvalidTimingData { day: DayOfWeek::Monday, .. })
        ));
    }

    #[test]
    fn test_all_split_hours_malformed_is_invalid() {
        let normalizer = TimingNormalizer::default();
        let result = normalizer.normalize_day(
            DayOfWeek::Tuesday,
            &DayTimingInput {
                split_hours: Some(vec![TimeRangeRecord::new("9am", "5pm")]),
                open: Some("09:00".to_string()),
                close: Some("17:00".to_string()),
                ..input("tuesday")
            },
        );

        assert_eq!(result.unwrap_err().kind(), "InvalidTimingData");
    }

    #[test]
    fn test_single_pair_and_empty_split_hours() {
        let normalizer = TimingNormalizer::default();
        let schedule = normalizer
            .normalize_day(
                DayOfWeek::Thursday,
                &DayTimingInput {
                    split_hours: Some(Vec::new()),
                    open: Some("22:00".to_string()),
                    close: Some("04:00".to_string()),
                    ..input("thursday")
                },
            )
            .unwrap();

        assert_eq!(schedule.ranges, vec![TimeRange::new(t("22:00"), t("04:00"))]);
    }

    #[test]
    fn test_no_usable_shape_names_the_day() {
        let normalizer = TimingNormalizer::default();
        let err = normalizer
            .normalize_day(DayOfWeek::Monday, &input("monday"))
            .unwrap_err();

        assert_eq!(err.kind(), "InvalidTimingData");
        assert_eq!(err.day().as_deref(), Some("monday"));

        let malformed = normalizer
            .normalize_day(
                DayOfWeek::Monday,
                &DayTimingInput {
                    open: Some("9:00".to_string()),
                    close: Some("17:00".to_string()),
                    ..input("monday")
                },
            )
            .unwrap_err();
        assert_eq!(malformed.kind(), "InvalidTimingData");
    }

    #[test]
    fn test_normalizing_canonical_day_is_idempotent() {
        let normalizer = TimingNormalizer::default();
        let original = DaySchedule::open(
            DayOfWeek::Saturday,
            vec![
                TimeRange::new(t("17:00"), t("02:00")),
                TimeRange::new(t("07:00"), t("11:00")),
            ],
        );

        for canonical in [original, DaySchedule::closed(DayOfWeek::Saturday)] {
            let again = normalizer
                .normalize_day(
                    DayOfWeek::Saturday,
                    &DayTimingInput::from(&canonical.to_record()),
                )
                .unwrap();
            assert_eq!(again, canonical);
        }
    }

    #[test]
    fn test_week_requires_every_day_once() {
        let normalizer = TimingNormalizer::default();

        let schedule = normalizer
            .normalize_week(TimingsPayload::List(full_week()))
            .unwrap();
        assert_eq!(schedule.len(), 7);
        assert!(schedule.is_complete());

        let mut unknown = full_week();
        unknown[2].day = Some("funday".to_string());
        assert_eq!(
            normalizer.normalize_week(TimingsPayload::List(unknown)),
            Err(ScheduleError::InvalidDay("funday".to_string()))
        );

        let mut duplicate = full_week();
        duplicate[3].day = Some("monday".to_string());
        assert_eq!(
            normalizer.normalize_week(TimingsPayload::List(duplicate)),
            Err(ScheduleError::DuplicateDay(DayOfWeek::Monday))
        );

        let mut missing = full_week();
        missing.pop();
        let err = normalizer
            .normalize_week(TimingsPayload::List(missing))
            .unwrap_err();
        assert_eq!(err, ScheduleError::MissingDay(DayOfWeek::Sunday));
        assert_eq!(err.kind(), "InvalidDay");
    }

    #[test]
    fn test_week_without_day_token_is_invalid_day() {
        let normalizer = TimingNormalizer::default();
        let mut entries = full_week();
        entries[0].day = None;

        assert_eq!(
            normalizer.normalize_week(TimingsPayload::List(entries)),
            Err(ScheduleError::InvalidDay(String::new()))
        );
    }

    #[test]
    fn test_map_and_list_forms_normalize_identically() {
        let normalizer = TimingNormalizer::default();
        let map = full_week()
            .into_iter()
            .map(|entry| {
                let day = entry.day.clone().unwrap();
                (day, DayTimingInput { day: None, ..entry })
            })
            .collect();

        assert_eq!(
            normalizer.normalize_week(TimingsPayload::Map(map)).unwrap(),
            normalizer
                .normalize_week(TimingsPayload::List(full_week()))
                .unwrap()
        );
    }

    #[test]
    fn test_read_stored_schedule_skips_bad_rows() {
        let mut records: Vec<DayRecord> = WeeklySchedule::all_closed()
            .to_records()
            .into_values()
            .collect();
        records[0] = DayRecord {
            day: "monday".to_string(),
            is_closed: false,
            open: "08:00".to_string(),
            close: "12:00".to_string(),
            split_hours: Vec::new(),
        };
        records[1] = DayRecord {
            day: "tuesday".to_string(),
            is_closed: false,
            open: "garbage".to_string(),
            close: "12:00".to_string(),
            split_hours: Vec::new(),
        };
        records[2] = DayRecord {
            day: "wednesday".to_string(),
            is_closed: false,
            open: "08:00".to_string(),
            close: "20:00".to_string(),
            split_hours: vec![
                TimeRangeRecord::new("08:00", "12:00"),
                TimeRangeRecord::new("xx:00", "20:00"),
            ],
        };
        records.push(DayRecord {
            day: "funday".to_string(),
            is_closed: true,
            open: "00:00".to_string(),
            close: "00:00".to_string(),
            split_hours: Vec::new(),
        });

        let mut rows: Vec<StoredDay> = records.into_iter().map(StoredDay::Record).collect();
        rows[3] = StoredDay::Unreadable {
            day: "thursday".to_string(),
            reason: "malformed split hours".to_string(),
        };

        let (schedule, anomalies) = read_stored_schedule(&rows);

        assert_eq!(
            schedule.get(DayOfWeek::Monday).unwrap().ranges,
            vec![TimeRange::new(t("08:00"), t("12:00"))]
        );
        assert!(schedule.get(DayOfWeek::Tuesday).is_none());
        assert_eq!(schedule.get(DayOfWeek::Wednesday).unwrap().ranges.len(), 1);
        assert!(schedule.get(DayOfWeek::Thursday).is_none());
        assert_eq!(schedule.len(), 5);
        assert_eq!(anomalies.len(), 4);
        assert!(anomalies.contains(&ScheduleAnomaly::InvalidTiming {
            day: DayOfWeek::Thursday,
            reason: "malformed split hours".to_string(),
        }));
        assert!(anomalies.contains(&ScheduleAnomaly::UnknownDay("funday".to_string())));
        assert!(anomalies.contains(&ScheduleAnomaly::DroppedRanges {
            day: DayOfWeek::Wednesday,
            count: 1
        }));
    }
}
