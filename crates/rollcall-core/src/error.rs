use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised when input records violate a structural invariant.
///
/// Missing or incomplete data is never an error here; the engine falls back
/// to defaults for that. These variants mean the data layer handed over
/// something inconsistent, and the numbers would be wrong if we carried on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid season year: {0}")]
    InvalidYear(i32),

    #[error("Invalid time of day: {0:?}")]
    InvalidTime(String),

    #[error("Unknown frequency: {0:?} (expected daily, weekly, biweekly or monthly)")]
    UnknownFrequency(String),

    #[error("Membership period left at {left_at} before it was joined at {joined_at}")]
    InvalidMembershipPeriod {
        joined_at: DateTime<Utc>,
        left_at: DateTime<Utc>,
    },

    #[error("Membership period joined at {joined_at} overlaps a period still active until {previous_left_at:?}")]
    OverlappingMembership {
        joined_at: DateTime<Utc>,
        previous_left_at: Option<DateTime<Utc>>,
    },

    #[error("Check-in {check_in_id} has negative hours logged: {hours}")]
    NegativeHours { check_in_id: String, hours: f64 },

    #[error("Deduction {name:?} has an invalid value: {value}")]
    InvalidDeduction { name: String, value: f64 },

    #[error("Invalid pay rate: {0}")]
    InvalidRate(f64),

    #[error("Invalid hours total for payroll: {0}")]
    InvalidHoursTotal(f64),
}

pub type Result<T> = std::result::Result<T, EngineError>;
