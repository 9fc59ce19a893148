use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInStatus {
    OnTime,
    Late,
    Absent,
    Excused,
}

impl CheckInStatus {
    /// On-time and late arrivals both count as attending
    pub fn is_present(&self) -> bool {
        matches!(self, CheckInStatus::OnTime | CheckInStatus::Late)
    }
}

/// A user's attendance record for one event.
///
/// `hours_logged` is authoritative. It is usually derivable from the
/// check-in/out times but coaches correct it by hand, so the engine never
/// recomputes it. Only approved check-ins count toward aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CheckIn {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub status: CheckInStatus,
    #[serde(rename = "checkInTime", default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(rename = "checkOutTime", default)]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(rename = "hoursLogged", default)]
    pub hours_logged: f64,
    #[serde(default)]
    pub approved: bool,
}
