//! Season calendar resolution.
//!
//! Turns a `(start_month, end_month, year)` triple into a closed interval of
//! instants. Seasons whose end month precedes the start month run into the
//! following year (Sep 2025 through Jun 2026).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::models::Season;

/// Closed `[start, end]` interval of instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SeasonRange {
    /// Fallback for teams without season data, so legacy records still count
    pub fn all_time(now: DateTime<Utc>) -> Self {
        Self {
            start: DateTime::UNIX_EPOCH,
            end: now,
        }
    }

    /// Resolve an optional season once, at the boundary.
    /// A missing season becomes the epoch-to-now range.
    pub fn resolve(season: Option<&Season>, now: DateTime<Utc>) -> Result<Self> {
        match season {
            Some(season) => season.range(),
            None => {
                debug!("No season configured, using all-time range");
                Ok(Self::all_time(now))
            }
        }
    }

    /// Same range with the end pulled back to `now`, so future events
    /// never inflate a requirement
    pub fn capped_at(&self, now: DateTime<Utc>) -> Self {
        Self {
            start: self.start,
            end: self.end.min(now),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Day-granular containment, comparing UTC calendar days
    pub fn contains_date(&self, day: NaiveDate) -> bool {
        self.start.date_naive() <= day && day <= self.end.date_naive()
    }
}

/// Resolve a season into concrete instants.
///
/// `start` is midnight on the 1st of `start_month`; `end` is the last
/// millisecond of `end_month`, in `year + 1` when the season wraps.
pub fn resolve_season_range(start_month: u32, end_month: u32, year: i32) -> Result<SeasonRange> {
    for month in [start_month, end_month] {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth(month));
        }
    }

    let end_year = if end_month < start_month {
        year.checked_add(1).ok_or(EngineError::InvalidYear(year))?
    } else {
        year
    };

    let start_date =
        NaiveDate::from_ymd_opt(year, start_month, 1).ok_or(EngineError::InvalidYear(year))?;
    let end_date = last_day_of_month(end_year, end_month).ok_or(EngineError::InvalidYear(year))?;
    let end_of_day =
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).ok_or(EngineError::InvalidYear(year))?;

    Ok(SeasonRange {
        start: start_date.and_time(NaiveTime::MIN).and_utc(),
        end: end_date.and_time(end_of_day).and_utc(),
    })
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

// ============================================================================
// Tests
// ============================================================================
