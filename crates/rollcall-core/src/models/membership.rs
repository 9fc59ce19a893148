use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A contiguous interval during which a user was an active team member.
///
/// `left_at == None` means the membership is still active. A user who
/// re-joins a team gets a new period; periods for the same (user, team)
/// never overlap and are ordered by `joined_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MembershipPeriod {
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
    #[serde(rename = "leftAt", default)]
    pub left_at: Option<DateTime<Utc>>,
}

impl MembershipPeriod {
    pub fn new(joined_at: DateTime<Utc>, left_at: Option<DateTime<Utc>>) -> Self {
        Self { joined_at, left_at }
    }

    /// Open-ended period starting at `joined_at`
    pub fn open(joined_at: DateTime<Utc>) -> Self {
        Self {
            joined_at,
            left_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.left_at.is_none()
    }

    /// Day-granular containment: the join and leave days are both inclusive.
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        if day < self.joined_at.date_naive() {
            return false;
        }
        match self.left_at {
            Some(left) => day <= left.date_naive(),
            None => true,
        }
    }
}
