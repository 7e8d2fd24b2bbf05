use crate::domain::entities::DayOfWeek;
use thiserror::Error;

/// Failures raised while validating, storing or reading the weekly schedule
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Invalid day: {0}. Must be one of: monday, tuesday, wednesday, thursday, friday, saturday, sunday")]
    InvalidDay(String),
    #[error("Duplicate day found: {0}")]
    DuplicateDay(DayOfWeek),
    #[error("Missing timing data for {0}; all seven days must be supplied")]
    MissingDay(DayOfWeek),
    #[error("Invalid timing data for {day}: {reason}")]
    InvalidTimingData { day: DayOfWeek, reason: String },
    #[error("Schedule update failed: {0}")]
    ScheduleUpdateFailed(String),
    #[error("Store configuration unavailable: {0}")]
    ConfigUnavailable(String),
}

impl ScheduleError {
    /// Stable error-kind string returned to API callers
    pub fn kind(&self) -> &'static str {
        match self {
            ScheduleError::InvalidDay(_) | ScheduleError::MissingDay(_) => "InvalidDay",
            ScheduleError::DuplicateDay(_) => "DuplicateDay",
            ScheduleError::InvalidTimingData { .. } => "InvalidTimingData",
            ScheduleError::ScheduleUpdateFailed(_) => "ScheduleUpdateFailed",
            ScheduleError::ConfigUnavailable(_) => "ConfigUnavailable",
        }
    }

    /// The offending day token, when the failure names one
    pub fn day(&self) -> Option<String> {
        match self {
            ScheduleError::InvalidDay(token) => Some(token.clone()),
            ScheduleError::DuplicateDay(day)
            | ScheduleError::MissingDay(day)
            | ScheduleError::InvalidTimingData { day, .. } => Some(day.to_string()),
            _ => None,
        }
    }

    /// True for failures detected before any mutation was attempted
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidDay(_)
                | ScheduleError::DuplicateDay(_)
                | ScheduleError::MissingDay(_)
                | ScheduleError::InvalidTimingData { .. }
        )
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
