//! Required vs. logged hours for a user.
//!
//! Four calendars meet here: the team's season, the user's join/leave
//! history, "now" (future events never count), and the event schedule. The
//! requirement is the summed duration of every regular event the user was
//! expected at; logged hours come from approved check-ins for exactly those
//! events.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::membership_filter::{filter_events_by_membership, resolve_periods};
use super::season_range::SeasonRange;
use crate::error::{EngineError, Result};
use crate::models::{Aggregate, CheckIn, Event, MembershipPeriod, Season, Team};

/// One team's worth of context for a user
#[derive(Debug, Clone, Copy)]
pub struct TeamScope<'a> {
    pub team_id: &'a str,
    pub season: Option<&'a Season>,
    pub periods: Option<&'a [MembershipPeriod]>,
}

impl<'a> TeamScope<'a> {
    /// Scope for `user_id` on `team`, or `None` if they are not on the roster
    pub fn for_member(team: &'a Team, user_id: &str) -> Option<Self> {
        team.member(user_id).map(|member| Self {
            team_id: &team.id,
            season: team.season.as_ref(),
            periods: member.membership(),
        })
    }
}

/// Hours and attendance for one user on one team.
///
/// Only non-ad-hoc events of the team (hosted or participating) dated
/// inside the season, no later than `now`, and inside one of the user's
/// membership periods are required. A missing season means all time; a
/// missing history means the whole season.
pub fn aggregate_hours(
    user_id: &str,
    team_id: &str,
    season: Option<&Season>,
    periods: Option<&[MembershipPeriod]>,
    events: &[Event],
    check_ins: &[CheckIn],
    now: DateTime<Utc>,
) -> Result<Aggregate> {
    let scope = TeamScope {
        team_id,
        season,
        periods,
    };
    let required = required_events(&scope, events, now)?;
    let event_ids: BTreeSet<&str> = required.iter().map(|e| e.id.as_str()).collect();

    let hours_required = required_hours(required.iter().copied())?;
    let hours_logged = logged_hours(user_id, &event_ids, check_ins)?;

    debug!(
        user_id,
        team_id,
        events = event_ids.len(),
        hours_required,
        hours_logged,
        "Aggregated team hours"
    );

    Ok(Aggregate::from_hours(hours_required, hours_logged))
}

/// Organization-wide hours for a user across every team they belong to.
///
/// Required events are collected per team and merged by event id, so an
/// event reachable through two memberships (home team plus participating
/// team) is counted once, and so are its check-ins.
pub fn aggregate_org_hours(
    user_id: &str,
    scopes: &[TeamScope<'_>],
    events: &[Event],
    check_ins: &[CheckIn],
    now: DateTime<Utc>,
) -> Result<Aggregate> {
    let mut merged: BTreeMap<&str, &Event> = BTreeMap::new();
    for scope in scopes {
        for event in required_events(scope, events, now)? {
            merged.entry(event.id.as_str()).or_insert(event);
        }
    }

    let event_ids: BTreeSet<&str> = merged.keys().copied().collect();
    let hours_required = required_hours(merged.values().copied())?;
    let hours_logged = logged_hours(user_id, &event_ids, check_ins)?;

    debug!(
        user_id,
        teams = scopes.len(),
        events = event_ids.len(),
        hours_required,
        hours_logged,
        "Aggregated organization hours"
    );

    Ok(Aggregate::from_hours(hours_required, hours_logged))
}

/// Scopes for every team on which `user_id` appears
pub fn member_scopes<'a>(teams: &'a [Team], user_id: &str) -> Vec<TeamScope<'a>> {
    teams
        .iter()
        .filter_map(|team| TeamScope::for_member(team, user_id))
        .collect()
}

/// Events a user was expected to attend for one team scope
pub fn required_events<'a>(
    scope: &TeamScope<'_>,
    events: &'a [Event],
    now: DateTime<Utc>,
) -> Result<Vec<&'a Event>> {
    let range = SeasonRange::resolve(scope.season, now)?;
    let window = range.capped_at(now);

    let candidates = events
        .iter()
        .filter(|e| !e.is_ad_hoc)
        .filter(|e| window.contains_date(e.date))
        .filter(|e| e.involves_team(scope.team_id));

    let periods = resolve_periods(scope.periods, &range)?;
    Ok(filter_events_by_membership(candidates, &periods))
}

fn required_hours<'a>(events: impl Iterator<Item = &'a Event>) -> Result<f64> {
    events.map(Event::duration_hours).sum()
}

/// Sum of authoritative `hours_logged` over the user's approved check-ins
/// for the given events
fn logged_hours(user_id: &str, event_ids: &BTreeSet<&str>, check_ins: &[CheckIn]) -> Result<f64> {
    let mut total = 0.0;
    for check_in in check_ins
        .iter()
        .filter(|c| c.approved && c.user_id == user_id)
        .filter(|c| event_ids.contains(c.event_id.as_str()))
    {
        if check_in.hours_logged < 0.0 || !check_in.hours_logged.is_finite() {
            return Err(EngineError::NegativeHours {
                check_in_id: check_in.id.clone(),
                hours: check_in.hours_logged,
            });
        }
        total += check_in.hours_logged;
    }
    Ok(total)
}

// ============================================================================
// Tests
// ============================================================================
