use super::schedule::{lenient_time_text, DayRecord, TimeRangeRecord};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One day's hours as submitted by a client, in any of the accepted shorthand forms
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTimingInput {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default, rename = "is24Hours")]
    pub is_24_hours: Option<bool>,
    #[serde(default)]
    pub is_closed: Option<bool>,
    #[serde(default, deserialize_with = "lenient_time_text")]
    pub open: Option<String>,
    #[serde(default, deserialize_with = "lenient_time_text")]
    pub close: Option<String>,
    #[serde(default)]
    pub split_hours: Option<Vec<TimeRangeRecord>>,
}

impl DayTimingInput {
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.day = Some(day.into());
        self
    }
}

impl From<&DayRecord> for DayTimingInput {
    fn from(record: &DayRecord) -> Self {
        Self {
            day: Some(record.day.clone()),
            is_24_hours: None,
            is_closed: Some(record.is_closed),
            open: Some(record.open.clone()),
            close: Some(record.close.clone()),
            split_hours: Some(record.split_hours.clone()),
        }
    }
}

/// Whole-week submission: an ordered list of `{day, ...}` records or a map keyed by day
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimingsPayload {
    List(Vec<DayTimingInput>),
    Map(BTreeMap<String, DayTimingInput>),
}

impl TimingsPayload {
    /// Flatten either form into one list; in the map form the key names the day
    pub fn into_entries(self) -> Vec<DayTimingInput> {
        match self {
            TimingsPayload::List(entries) => entries,
            TimingsPayload::Map(entries) => entries
                .into_iter()
                .map(|(day, timing)| timing.with_day(day))
                .collect(),
        }
    }
}

/// Request body for a schedule update, with or without the `timings` wrapper
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UpdateTimingsRequest {
    Wrapped { timings: TimingsPayload },
    Bare(TimingsPayload),
}

impl UpdateTimingsRequest {
    pub fn into_payload(self) -> TimingsPayload {
        match self {
            UpdateTimingsRequest::Wrapped { timings } => timings,
            UpdateTimingsRequest::Bare(timings) => timings,
        }
    }
}
