//! Leaderboards and team-vs-team rankings.
//!
//! Ranks are ordinal: entries with equal scores get consecutive, distinct
//! ranks in their input order. Nothing is collapsed into shared places.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::hours::{aggregate_hours, aggregate_org_hours, TeamScope};
use crate::error::{EngineError, Result};
use crate::models::{attendance_percent, Aggregate, CheckIn, Event, Team};

/// An entry with its 1-based position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "hoursRequired")]
    pub hours_required: f64,
    #[serde(rename = "hoursLogged")]
    pub hours_logged: f64,
    #[serde(rename = "attendancePercent")]
    pub attendance_percent: f64,
    /// Teams whose percentage went into the average (1 on a team board)
    #[serde(rename = "teamsCounted")]
    pub teams_counted: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRankingEntry {
    #[serde(rename = "teamId")]
    pub team_id: String,
    #[serde(rename = "teamName")]
    pub team_name: String,
    #[serde(rename = "hoursRequired")]
    pub hours_required: f64,
    #[serde(rename = "hoursLogged")]
    pub hours_logged: f64,
    #[serde(rename = "attendancePercent")]
    pub attendance_percent: f64,
    #[serde(rename = "memberCount")]
    pub member_count: usize,
}

/// Stable descending sort by `score`, then assign `rank = index + 1`
pub fn rank_entries<T, F>(mut entries: Vec<T>, score: F) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> f64,
{
    entries.sort_by(|a, b| score(b).total_cmp(&score(a)));
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| Ranked {
            rank: index + 1,
            entry,
        })
        .collect()
}

/// Athletes on one team ranked by attendance percentage
pub fn team_leaderboard(
    team: &Team,
    events: &[Event],
    check_ins: &[CheckIn],
    now: DateTime<Utc>,
    limit: Option<usize>,
) -> Result<Vec<Ranked<LeaderboardEntry>>> {
    let mut entries = Vec::new();
    for member in team.athletes() {
        let aggregate = aggregate_hours(
            &member.user_id,
            &team.id,
            team.season.as_ref(),
            member.membership(),
            events,
            check_ins,
            now,
        )?;
        entries.push(LeaderboardEntry {
            user_id: member.user_id.clone(),
            display_name: member.display_name.clone(),
            hours_required: aggregate.hours_required,
            hours_logged: aggregate.hours_logged,
            attendance_percent: aggregate.attendance_percent,
            teams_counted: 1,
        });
    }

    let mut ranked = rank_entries(entries, |e| e.attendance_percent);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    Ok(ranked)
}

/// A member's aggregate on a team with `rank` and `team_size` filled in.
///
/// Returns `None` when the user is not on the roster. Staff members get
/// their hours but no rank, since only athletes are ranked.
pub fn member_standing(
    team: &Team,
    user_id: &str,
    events: &[Event],
    check_ins: &[CheckIn],
    now: DateTime<Utc>,
) -> Result<Option<Aggregate>> {
    let Some(member) = team.member(user_id) else {
        return Ok(None);
    };

    let board = team_leaderboard(team, events, check_ins, now, None)?;
    let team_size = board.len();

    if let Some(ranked) = board.into_iter().find(|r| r.entry.user_id == user_id) {
        return Ok(Some(Aggregate {
            hours_required: ranked.entry.hours_required,
            hours_logged: ranked.entry.hours_logged,
            attendance_percent: ranked.entry.attendance_percent,
            rank: Some(ranked.rank),
            team_size: Some(team_size),
        }));
    }

    let aggregate = aggregate_hours(
        user_id,
        &team.id,
        team.season.as_ref(),
        member.membership(),
        events,
        check_ins,
        now,
    )?;
    Ok(Some(Aggregate {
        team_size: Some(team_size),
        ..aggregate
    }))
}

#[derive(Debug, Default)]
struct OrgTotals<'a> {
    display_name: String,
    scopes: Vec<TeamScope<'a>>,
    percents: Vec<f64>,
}

/// One ranked entry per athlete across all current-season teams.
///
/// Each team's percentage is computed independently and averaged; teams
/// with no required hours are left out of the average rather than counted
/// as zero. Hour totals come from the union of the user's required events,
/// so an event shared between two of their teams counts once.
pub fn organization_leaderboard(
    teams: &[Team],
    events: &[Event],
    check_ins: &[CheckIn],
    now: DateTime<Utc>,
    limit: Option<usize>,
) -> Result<Vec<Ranked<LeaderboardEntry>>> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, OrgTotals<'_>> = HashMap::new();

    for team in teams.iter().filter(|t| t.is_current(now)) {
        for member in team.athletes() {
            let aggregate = aggregate_hours(
                &member.user_id,
                &team.id,
                team.season.as_ref(),
                member.membership(),
                events,
                check_ins,
                now,
            )?;

            let entry = totals.entry(member.user_id.clone()).or_insert_with(|| {
                order.push(member.user_id.clone());
                OrgTotals::default()
            });
            if entry.display_name.is_empty() {
                entry.display_name = member.display_name.clone();
            }
            entry.scopes.push(TeamScope {
                team_id: &team.id,
                season: team.season.as_ref(),
                periods: member.membership(),
            });
            if aggregate.hours_required > 0.0 {
                entry.percents.push(aggregate.attendance_percent);
            } else {
                debug!(user_id = %member.user_id, team_id = %team.id, "No required hours, excluded from average");
            }
        }
    }

    let mut entries = Vec::with_capacity(order.len());
    for user_id in order {
        let Some(totals) = totals.remove(&user_id) else {
            continue;
        };
        let merged = aggregate_org_hours(&user_id, &totals.scopes, events, check_ins, now)?;
        let attendance_percent = if totals.percents.is_empty() {
            0.0
        } else {
            totals.percents.iter().sum::<f64>() / totals.percents.len() as f64
        };
        entries.push(LeaderboardEntry {
            user_id,
            display_name: totals.display_name,
            hours_required: merged.hours_required,
            hours_logged: merged.hours_logged,
            attendance_percent,
            teams_counted: totals.percents.len(),
        });
    }

    let mut ranked = rank_entries(entries, |e| e.attendance_percent);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    Ok(ranked)
}

/// Current-season teams ranked against each other.
///
/// Logged hours are the athletes' approved check-ins on the team's regular
/// events between season start and `now`. The requirement is the sum of
/// each athlete's stored `hours_required`, not a recomputed one.
pub fn team_rankings(
    teams: &[Team],
    events: &[Event],
    check_ins: &[CheckIn],
    now: DateTime<Utc>,
) -> Result<Vec<Ranked<TeamRankingEntry>>> {
    let mut entries = Vec::new();

    for team in teams.iter().filter(|t| t.is_current(now)) {
        let Some(season) = team.season.as_ref() else {
            continue;
        };
        let window = season.range()?.capped_at(now);

        let event_ids: BTreeSet<&str> = events
            .iter()
            .filter(|e| !e.is_ad_hoc && e.involves_team(&team.id) && window.contains_date(e.date))
            .map(|e| e.id.as_str())
            .collect();
        let athlete_ids: BTreeSet<&str> = team.athletes().map(|m| m.user_id.as_str()).collect();

        let mut hours_logged = 0.0;
        for check_in in check_ins.iter().filter(|c| {
            c.approved
                && athlete_ids.contains(c.user_id.as_str())
                && event_ids.contains(c.event_id.as_str())
        }) {
            if check_in.hours_logged < 0.0 || !check_in.hours_logged.is_finite() {
                return Err(EngineError::NegativeHours {
                    check_in_id: check_in.id.clone(),
                    hours: check_in.hours_logged,
                });
            }
            hours_logged += check_in.hours_logged;
        }

        let hours_required: f64 = team.athletes().filter_map(|m| m.hours_required).sum();

        entries.push(TeamRankingEntry {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            hours_required,
            hours_logged,
            attendance_percent: attendance_percent(hours_required, hours_logged),
            member_count: athlete_ids.len(),
        });
    }

    Ok(rank_entries(entries, |e| e.attendance_percent))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckInStatus, MemberRole, MembershipPeriod, Season, TeamMember};
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    fn member(user: &str, role: MemberRole) -> TeamMember {
        TeamMember {
            user_id: user.to_string(),
            display_name: user.to_uppercase(),
            role,
            periods: vec![],
            hours_required: None,
        }
    }

    fn team(id: &str, season: Option<Season>, members: Vec<TeamMember>) -> Team {
        Team {
            id: id.to_string(),
            name: format!("Team {id}"),
            season,
            members,
        }
    }

    fn event(id: &str, team: &str, d: u32) -> Event {
        Event {
            id: id.to_string(),
            name: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 9, d).unwrap(),
            start_time: "4:00 PM".to_string(),
            end_time: "6:00 PM".to_string(),
            team_id: team.to_string(),
            participating_team_ids: vec![],
            is_ad_hoc: false,
        }
    }

    fn check_in(user: &str, event: &str, hours: f64) -> CheckIn {
        CheckIn {
            id: format!("{user}-{event}"),
            user_id: user.to_string(),
            event_id: event.to_string(),
            status: CheckInStatus::OnTime,
            check_in_time: None,
            check_out_time: None,
            hours_logged: hours,
            approved: true,
        }
    }

    fn season() -> Option<Season> {
        Some(Season::new(9, 6, 2025))
    }

    // -------------------------------------------------------------------------
    // rank_entries
    // -------------------------------------------------------------------------

    #[test]
    fn test_ties_get_consecutive_ranks_in_input_order() {
        let ranked = rank_entries(vec![("a", 50.0), ("b", 80.0), ("c", 50.0), ("d", 80.0)], |e| e.1);
        let order: Vec<(usize, &str)> = ranked.iter().map(|r| (r.rank, r.entry.0)).collect();
        assert_eq!(order, vec![(1, "b"), (2, "d"), (3, "a"), (4, "c")]);
    }

    #[test]
    fn test_rank_entries_empty() {
        let ranked: Vec<Ranked<f64>> = rank_entries(Vec::new(), |e| *e);
        assert!(ranked.is_empty());
    }

    // -------------------------------------------------------------------------
    // Team leaderboard
    // -------------------------------------------------------------------------

    #[test]
    fn test_team_leaderboard_ranks_athletes_only_and_truncates() {
        let t = team(
            "t1",
            season(),
            vec![
                member("ana", MemberRole::Athlete),
                member("ben", MemberRole::Captain),
                member("cal", MemberRole::Athlete),
                member("coach", MemberRole::Coach),
            ],
        );
        let events = vec![event("e1", "t1", 2), event("e2", "t1", 4)];
        let check_ins = vec![
            check_in("ana", "e1", 2.0),
            check_in("ben", "e1", 2.0),
            check_in("ben", "e2", 2.0),
            check_in("cal", "e1", 2.0),
            check_in("coach", "e1", 2.0),
            check_in("coach", "e2", 2.0),
        ];

        let board = team_leaderboard(&t, &events, &check_ins, now(), None).unwrap();
        let order: Vec<(usize, &str, f64)> = board
            .iter()
            .map(|r| (r.rank, r.entry.user_id.as_str(), r.entry.attendance_percent))
            .collect();
        assert_eq!(order, vec![(1, "ben", 100.0), (2, "ana", 50.0), (3, "cal", 50.0)]);

        let top = team_leaderboard(&t, &events, &check_ins, now(), Some(2)).unwrap();
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_member_standing() {
        let t = team(
            "t1",
            season(),
            vec![member("ana", MemberRole::Athlete), member("ben", MemberRole::Athlete), member("coach", MemberRole::Coach)],
        );
        let events = vec![event("e1", "t1", 2)];
        let check_ins = vec![check_in("ben", "e1", 2.0)];

        let standing = member_standing(&t, "ana", &events, &check_ins, now()).unwrap().unwrap();
        assert_eq!(standing.rank, Some(2));
        assert_eq!(standing.team_size, Some(2));
        assert_eq!(standing.attendance_percent, 0.0);

        let staff = member_standing(&t, "coach", &events, &check_ins, now()).unwrap().unwrap();
        assert_eq!(staff.rank, None);
        assert_eq!(staff.hours_required, 2.0);

        assert!(member_standing(&t, "ghost", &events, &check_ins, now()).unwrap().is_none());
    }

    // -------------------------------------------------------------------------
    // Organization leaderboard
    // -------------------------------------------------------------------------

    #[test]
    fn test_org_leaderboard_averages_percent_and_sums_hours() {
        let teams = vec![
            team("t1", season(), vec![member("ana", MemberRole::Athlete), member("ben", MemberRole::Athlete)]),
            team("t2", season(), vec![member("ana", MemberRole::Athlete)]),
        ];
        let events = vec![event("e1", "t1", 2), event("e2", "t2", 3), event("e3", "t2", 4)];
        let check_ins = vec![
            // ana: 100% on t1, 50% on t2 => 75% average
            check_in("ana", "e1", 2.0),
            check_in("ana", "e2", 2.0),
            // ben: 50% on t1
            check_in("ben", "e1", 1.0),
        ];

        let board = organization_leaderboard(&teams, &events, &check_ins, now(), None).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].entry.user_id, "ana");
        assert_eq!(board[0].entry.attendance_percent, 75.0);
        assert_eq!(board[0].entry.hours_required, 6.0);
        assert_eq!(board[0].entry.hours_logged, 4.0);
        assert_eq!(board[0].entry.teams_counted, 2);
        assert_eq!(board[1].entry.user_id, "ben");
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn test_org_leaderboard_counts_shared_event_once() {
        let teams = vec![
            team("t1", season(), vec![member("ana", MemberRole::Athlete)]),
            team("t2", season(), vec![member("ana", MemberRole::Athlete)]),
        ];
        let mut shared = event("shared", "t1", 6);
        shared.participating_team_ids = vec!["t2".to_string()];
        let events = vec![shared, event("t2-only", "t2", 8)];
        let check_ins = vec![check_in("ana", "shared", 2.0)];

        let board = organization_leaderboard(&teams, &events, &check_ins, now(), None).unwrap();
        assert_eq!(board.len(), 1);
        let ana = &board[0].entry;
        // 2h shared + 2h t2-only, shared check-in counted once
        assert_eq!(ana.hours_required, 4.0);
        assert_eq!(ana.hours_logged, 2.0);
        // t1: 2/2 = 100%, t2: 2/4 = 50%
        assert_eq!(ana.attendance_percent, 75.0);
        assert_eq!(ana.teams_counted, 2);

        let scopes: Vec<TeamScope<'_>> = teams
            .iter()
            .filter_map(|t| TeamScope::for_member(t, "ana"))
            .collect();
        let org = aggregate_org_hours("ana", &scopes, &events, &check_ins, now()).unwrap();
        assert_eq!(org.hours_required, ana.hours_required);
        assert_eq!(org.hours_logged, ana.hours_logged);
    }

    #[test]
    fn test_org_leaderboard_excludes_zero_requirement_teams_from_average() {
        let mut late_joiner = member("ana", MemberRole::Athlete);
        late_joiner.periods = vec![MembershipPeriod::open(Utc.with_ymd_and_hms(2025, 9, 30, 0, 0, 0).unwrap())];
        let teams = vec![
            team("t1", season(), vec![member("ana", MemberRole::Athlete)]),
            // No t2 events since ana joined, so t2 does not drag her down
            team("t2", season(), vec![late_joiner]),
        ];
        let events = vec![event("e1", "t1", 2), event("e2", "t2", 3)];
        let check_ins = vec![check_in("ana", "e1", 2.0)];

        let board = organization_leaderboard(&teams, &events, &check_ins, now(), None).unwrap();
        assert_eq!(board[0].entry.attendance_percent, 100.0);
        assert_eq!(board[0].entry.teams_counted, 1);
    }

    #[test]
    fn test_org_leaderboard_skips_teams_outside_current_season() {
        let teams = vec![
            team("old", Some(Season::new(9, 6, 2023)), vec![member("ana", MemberRole::Athlete)]),
            team("legacy", None, vec![member("ben", MemberRole::Athlete)]),
        ];
        let board = organization_leaderboard(&teams, &[], &[], now(), None).unwrap();
        assert!(board.is_empty());
    }

    // -------------------------------------------------------------------------
    // Team rankings
    // -------------------------------------------------------------------------

    #[test]
    fn test_team_rankings_use_stored_requirement() {
        let mut ana = member("ana", MemberRole::Athlete);
        ana.hours_required = Some(10.0);
        let mut ben = member("ben", MemberRole::Athlete);
        ben.hours_required = Some(10.0);
        let mut cal = member("cal", MemberRole::Athlete);
        cal.hours_required = Some(4.0);
        let mut coach = member("coach", MemberRole::Coach);
        coach.hours_required = Some(100.0);

        let teams = vec![
            team("t1", season(), vec![ana, ben, coach]),
            team("t2", season(), vec![cal]),
            team("old", Some(Season::new(1, 5, 2024)), vec![]),
        ];
        let mut ad_hoc = event("adhoc", "t1", 5);
        ad_hoc.is_ad_hoc = true;
        let events = vec![event("e1", "t1", 2), event("e2", "t2", 2), ad_hoc];
        let check_ins = vec![
            check_in("ana", "e1", 2.0),
            check_in("ben", "e1", 3.0),
            check_in("ben", "adhoc", 3.0),
            check_in("coach", "e1", 2.0),
            check_in("cal", "e2", 2.0),
        ];

        let rankings = team_rankings(&teams, &events, &check_ins, now()).unwrap();
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0].entry.team_id, "t2");
        assert_eq!(rankings[0].entry.attendance_percent, 50.0);
        assert_eq!(rankings[1].entry.team_id, "t1");
        assert_eq!(rankings[1].entry.hours_logged, 5.0);
        assert_eq!(rankings[1].entry.hours_required, 20.0);
        assert_eq!(rankings[1].entry.attendance_percent, 25.0);
        assert_eq!(rankings[1].entry.member_count, 2);
    }
}
