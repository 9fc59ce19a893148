//! The attendance-aggregation engine.
//!
//! Every function here is pure: callers pass already-fetched records and an
//! explicit `now`, and get derived figures back. Nothing is cached between
//! calls, so results for different users or teams can be computed on as
//! many threads as the caller likes.
//!
//! - `season_range`: season calendar resolution
//! - `membership_filter`: join/leave history filtering
//! - `duration`: event length from time strings
//! - `recurrence`: recurring schedule dates
//! - `hours`: required vs. logged hours and attendance percent
//! - `streaks`: current and best attendance streaks
//! - `ranking`: team and organization leaderboards, team rankings
//! - `payroll`: gross-to-net pay with ordered deductions

pub mod duration;
pub mod hours;
pub mod membership_filter;
pub mod payroll;
pub mod ranking;
pub mod recurrence;
pub mod season_range;
pub mod streaks;

pub use duration::{compute_event_duration, parse_time_of_day};
pub use hours::{aggregate_hours, aggregate_org_hours, member_scopes, required_events, TeamScope};
pub use membership_filter::{filter_events_by_membership, resolve_periods, validate_periods};
pub use payroll::{compute_payroll, round2};
pub use ranking::{
    member_standing, organization_leaderboard, rank_entries, team_leaderboard, team_rankings,
    LeaderboardEntry, Ranked, TeamRankingEntry,
};
pub use recurrence::generate_recurring_dates;
pub use season_range::{resolve_season_range, SeasonRange};
pub use streaks::{compute_streaks, streaks_for_user, Streaks};
