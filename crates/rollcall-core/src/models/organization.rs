use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CheckIn, DeductionRule, Event, PayProfile, RecurringSchedule, Team};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct OrganizationMember {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(flatten)]
    pub pay: PayProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Organization {
    pub id: String,
    pub name: String,
    /// Applied in list order
    #[serde(default)]
    pub deductions: Vec<DeductionRule>,
    #[serde(default)]
    pub members: Vec<OrganizationMember>,
}

impl Organization {
    pub fn member(&self, user_id: &str) -> Option<&OrganizationMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }
}

/// Records exported from the storage layer for one organization.
///
/// The engine never fetches anything itself; callers hand it a snapshot
/// like this one, already materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub organization: Organization,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub schedules: Vec<RecurringSchedule>,
    #[serde(rename = "checkIns", default)]
    pub check_ins: Vec<CheckIn>,
    #[serde(rename = "exportedAt", default)]
    pub exported_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Stored events plus expanded recurring schedules.
    /// A stored event wins over a generated one with the same id.
    pub fn all_events(&self) -> Vec<Event> {
        let mut seen: HashSet<String> = self.events.iter().map(|e| e.id.clone()).collect();
        let mut events = self.events.clone();
        for schedule in &self.schedules {
            for event in schedule.expand() {
                if seen.insert(event.id.clone()) {
                    events.push(event);
                }
            }
        }
        events.sort_by(|a, b| a.date.cmp(&b.date));
        events
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Best available name for a user across the organization and teams
    pub fn display_name(&self, user_id: &str) -> String {
        self.organization
            .member(user_id)
            .map(|m| m.display_name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| {
                self.teams
                    .iter()
                    .filter_map(|t| t.member(user_id))
                    .map(|m| m.display_name.clone())
                    .find(|n| !n.is_empty())
            })
            .unwrap_or_else(|| user_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "organization": {
            "id": "org1",
            "name": "Riverside Rowing",
            "deductions": [{"name": "Dues", "type": "FLAT", "value": 5}],
            "members": [{"userId": "u1", "displayName": "Sam Reyes", "hourlyRate": 15.0}]
        },
        "teams": [{
            "id": "t1",
            "name": "Novice",
            "season": {"startMonth": 9, "endMonth": 6, "year": 2025},
            "members": [{"userId": "u1", "role": "ATHLETE"}]
        }],
        "events": [{
            "id": "practice-2025-09-02",
            "date": "2025-09-02",
            "startTime": "6:00 AM",
            "endTime": "7:30 AM",
            "teamId": "t1"
        }],
        "schedules": [{
            "templateId": "practice",
            "startTime": "6:00 AM",
            "endTime": "8:00 AM",
            "teamId": "t1",
            "rule": {
                "frequency": "WEEKLY",
                "daysOfWeek": [2],
                "startDate": "2025-09-01",
                "endDate": "2025-09-14"
            }
        }],
        "checkIns": []
    }"#;

    #[test]
    fn test_snapshot_parses_and_flattens_pay() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let member = snapshot.organization.member("u1").unwrap();
        assert_eq!(member.pay.hourly_rate, Some(15.0));
        assert_eq!(snapshot.display_name("u1"), "Sam Reyes");
        assert_eq!(snapshot.display_name("ghost"), "ghost");
    }

    #[test]
    fn test_all_events_prefers_stored_event() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let events = snapshot.all_events();
        // Tuesdays Sep 2 and Sep 9; Sep 2 already stored with its own times
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "practice-2025-09-02");
        assert_eq!(events[0].end_time, "7:30 AM");
        assert_eq!(events[1].id, "practice-2025-09-09");
    }
}
