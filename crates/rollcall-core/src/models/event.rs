use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::duration::compute_event_duration;
use crate::analytics::recurrence::generate_recurring_dates;
use crate::error::{EngineError, Result};

/// A scheduled practice, game or meeting.
///
/// Times are local `h:mm AM/PM` strings as entered by coaches; the duration
/// is derived from them and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(rename = "teamId")]
    pub team_id: String,
    #[serde(rename = "participatingTeamIds", default)]
    pub participating_team_ids: Vec<String>,
    #[serde(rename = "isAdHoc", default)]
    pub is_ad_hoc: bool,
}

impl Event {
    /// True if the event is hosted by the team or the team is invited to it
    pub fn involves_team(&self, team_id: &str) -> bool {
        self.team_id == team_id || self.participating_team_ids.iter().any(|t| t == team_id)
    }

    pub fn duration_hours(&self) -> Result<f64> {
        compute_event_duration(&self.start_time, &self.end_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "Daily"),
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Biweekly => write!(f, "Every other week"),
            Frequency::Monthly => write!(f, "Monthly"),
        }
    }
}

/// Case-insensitive frequency name, as typed on the command line
impl std::str::FromStr for Frequency {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(EngineError::UnknownFrequency(s.to_string())),
        }
    }
}

/// Recurrence rule attached to a schedule template.
///
/// `days_of_week` uses 0 = Sunday through 6 = Saturday and is ignored for
/// daily and monthly rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[serde(rename = "daysOfWeek", default)]
    pub days_of_week: Vec<u8>,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
}

/// A regular schedule entry that expands into one event per occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RecurringSchedule {
    #[serde(rename = "templateId")]
    pub template_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(rename = "teamId")]
    pub team_id: String,
    #[serde(rename = "participatingTeamIds", default)]
    pub participating_team_ids: Vec<String>,
    pub rule: RecurrenceRule,
}

impl RecurringSchedule {
    /// Concrete events for every date the rule generates.
    /// Ids are `<templateId>-<YYYY-MM-DD>` so re-expansion is stable.
    pub fn expand(&self) -> Vec<Event> {
        generate_recurring_dates(
            self.rule.start_date,
            self.rule.end_date,
            self.rule.frequency,
            &self.rule.days_of_week,
        )
        .into_iter()
        .map(|at| {
            let date = at.date_naive();
            Event {
                id: format!("{}-{}", self.template_id, date.format("%Y-%m-%d")),
                name: self.name.clone(),
                date,
                start_time: self.start_time.clone(),
                end_time: self.end_time.clone(),
                team_id: self.team_id.clone(),
                participating_team_ids: self.participating_team_ids.clone(),
                is_ad_hoc: false,
            }
        })
        .collect()
    }
}
