//! Consecutive-attendance streaks.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CheckIn, CheckInStatus, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Streaks {
    #[serde(rename = "currentStreak")]
    pub current_streak: u32,
    #[serde(rename = "bestStreak")]
    pub best_streak: u32,
}

/// Current and best streaks from `(event date, status)` pairs in any order.
///
/// The two counts deliberately differ in how they treat an absence:
/// - best: on-time/late extends the run, absent resets it to zero and the
///   scan continues; the longest run wins.
/// - current: counts back from the most recent event and stops at the
///   first absence.
///
/// Excused entries are neutral in both: they neither extend nor break.
pub fn compute_streaks(records: &[(NaiveDate, CheckInStatus)]) -> Streaks {
    let mut ordered = records.to_vec();
    ordered.sort_by_key(|(date, _)| *date);

    let mut best_streak = 0;
    let mut running = 0;
    for (_, status) in &ordered {
        match status {
            CheckInStatus::OnTime | CheckInStatus::Late => {
                running += 1;
                best_streak = best_streak.max(running);
            }
            CheckInStatus::Absent => running = 0,
            CheckInStatus::Excused => {}
        }
    }

    let mut current_streak = 0;
    for (_, status) in ordered.iter().rev() {
        match status {
            CheckInStatus::OnTime | CheckInStatus::Late => current_streak += 1,
            CheckInStatus::Absent => break,
            CheckInStatus::Excused => continue,
        }
    }

    Streaks {
        current_streak,
        best_streak,
    }
}

/// Streaks for one user, dating each check-in by its event.
/// Check-ins whose event is not in `events` are skipped.
pub fn streaks_for_user(user_id: &str, check_ins: &[CheckIn], events: &[Event]) -> Streaks {
    let dates: HashMap<&str, NaiveDate> = events.iter().map(|e| (e.id.as_str(), e.date)).collect();

    let records: Vec<(NaiveDate, CheckInStatus)> = check_ins
        .iter()
        .filter(|c| c.user_id == user_id)
        .filter_map(|c| match dates.get(c.event_id.as_str()) {
            Some(date) => Some((*date, c.status)),
            None => {
                debug!(check_in_id = %c.id, event_id = %c.event_id, "Check-in for unknown event");
                None
            }
        })
        .collect();

    compute_streaks(&records)
}

// ============================================================================
// Tests
// ============================================================================
