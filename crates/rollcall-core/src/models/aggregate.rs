use serde::{Deserialize, Serialize};

/// Hours and attendance derived for one user over one scope.
///
/// Computed per query and never persisted. `rank` and `team_size` are only
/// filled in when the aggregate was produced as part of a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Aggregate {
    #[serde(rename = "hoursRequired")]
    pub hours_required: f64,
    #[serde(rename = "hoursLogged")]
    pub hours_logged: f64,
    #[serde(rename = "attendancePercent")]
    pub attendance_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rank: Option<usize>,
    #[serde(rename = "teamSize", skip_serializing_if = "Option::is_none", default)]
    pub team_size: Option<usize>,
}

impl Aggregate {
    /// Build an aggregate from totals, deriving the capped percentage
    pub fn from_hours(hours_required: f64, hours_logged: f64) -> Self {
        Self {
            hours_required,
            hours_logged,
            attendance_percent: attendance_percent(hours_required, hours_logged),
            rank: None,
            team_size: None,
        }
    }
}

/// Logged over required hours as a percentage in `[0, 100]`.
/// Over-logging is capped; no requirement yields 0.
pub fn attendance_percent(hours_required: f64, hours_logged: f64) -> f64 {
    if hours_required > 0.0 {
        (hours_logged / hours_required * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_percent_caps_at_100() {
        assert_eq!(attendance_percent(10.0, 25.0), 100.0);
        assert_eq!(attendance_percent(10.0, 5.0), 50.0);
    }

    #[test]
    fn test_attendance_percent_zero_requirement() {
        assert_eq!(attendance_percent(0.0, 12.0), 0.0);
        assert_eq!(attendance_percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_aggregate_omits_unset_rank() {
        let json = serde_json::to_string(&Aggregate::from_hours(4.0, 3.0)).unwrap();
        assert_eq!(
            json,
            r#"{"hoursRequired":4.0,"hoursLogged":3.0,"attendancePercent":75.0}"#
        );
    }
}
