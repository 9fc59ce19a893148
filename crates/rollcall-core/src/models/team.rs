use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{MembershipPeriod, Season};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Athlete,
    Captain,
    Coach,
    Manager,
    Admin,
}

impl MemberRole {
    /// Roles that are held to an hours requirement and appear on leaderboards
    pub fn is_athlete(&self) -> bool {
        matches!(self, MemberRole::Athlete | MemberRole::Captain)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TeamMember {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    pub role: MemberRole,
    /// Join/leave history, oldest first. Empty for legacy records.
    #[serde(default)]
    pub periods: Vec<MembershipPeriod>,
    /// Stored season requirement, used only by the team-vs-team ranking
    #[serde(rename = "hoursRequired", default)]
    pub hours_required: Option<f64>,
}

impl TeamMember {
    /// Membership history, or `None` when the record predates join tracking
    pub fn membership(&self) -> Option<&[MembershipPeriod]> {
        if self.periods.is_empty() {
            None
        } else {
            Some(&self.periods)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl Team {
    /// A team is current when `now` falls inside its resolved season.
    /// Teams without season data are never current.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        match self.season.as_ref().map(Season::range) {
            Some(Ok(range)) => range.contains(now),
            Some(Err(e)) => {
                warn!(team_id = %self.id, error = %e, "Ignoring team with invalid season");
                false
            }
            None => false,
        }
    }

    pub fn athletes(&self) -> impl Iterator<Item = &TeamMember> {
        self.members.iter().filter(|m| m.role.is_athlete())
    }

    pub fn member(&self, user_id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }
}
