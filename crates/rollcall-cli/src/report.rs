//! Plain-text rendering of engine results.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use rollcall_core::analytics::{LeaderboardEntry, Ranked, SeasonRange, Streaks, TeamRankingEntry};
use rollcall_core::models::{Aggregate, PayrollSummary};
use rollcall_core::utils::{format_currency, format_date, format_hours, format_percent, truncate_string};

/// Width of the name column in tables
const NAME_WIDTH: usize = 24;

pub fn render_aggregate(title: &str, aggregate: &Aggregate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "  Required:   {}", format_hours(aggregate.hours_required));
    let _ = writeln!(out, "  Logged:     {}", format_hours(aggregate.hours_logged));
    let _ = writeln!(out, "  Attendance: {}", format_percent(aggregate.attendance_percent));
    if let (Some(rank), Some(size)) = (aggregate.rank, aggregate.team_size) {
        let _ = writeln!(out, "  Rank:       {} of {}", rank, size);
    }
    out
}

pub fn render_streaks(name: &str, streaks: &Streaks) -> String {
    format!(
        "{}\n  Current streak: {}\n  Best streak:    {}\n",
        name, streaks.current_streak, streaks.best_streak
    )
}

pub fn render_leaderboard(title: &str, board: &[Ranked<LeaderboardEntry>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    if board.is_empty() {
        let _ = writeln!(out, "  (no athletes)");
        return out;
    }
    let _ = writeln!(
        out,
        "  {:>4}  {:<width$}  {:>9}  {:>9}  {:>8}",
        "#",
        "Name",
        "Logged",
        "Required",
        "Attend",
        width = NAME_WIDTH
    );
    for ranked in board {
        let entry = &ranked.entry;
        let name = if entry.display_name.is_empty() {
            &entry.user_id
        } else {
            &entry.display_name
        };
        let _ = writeln!(
            out,
            "  {:>4}  {:<width$}  {:>9}  {:>9}  {:>8}",
            ranked.rank,
            truncate_string(name, NAME_WIDTH),
            format_hours(entry.hours_logged),
            format_hours(entry.hours_required),
            format_percent(entry.attendance_percent),
            width = NAME_WIDTH
        );
    }
    out
}

pub fn render_team_rankings(rankings: &[Ranked<TeamRankingEntry>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Team rankings");
    if rankings.is_empty() {
        let _ = writeln!(out, "  (no teams in a current season)");
        return out;
    }
    for ranked in rankings {
        let entry = &ranked.entry;
        let _ = writeln!(
            out,
            "  {:>4}  {:<width$}  {:>9} / {:>9}  {:>8}  ({} athletes)",
            ranked.rank,
            truncate_string(&entry.team_name, NAME_WIDTH),
            format_hours(entry.hours_logged),
            format_hours(entry.hours_required),
            format_percent(entry.attendance_percent),
            entry.member_count,
            width = NAME_WIDTH
        );
    }
    out
}

pub fn render_payroll(name: &str, summary: &PayrollSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", name);
    let _ = writeln!(out, "  Hours:     {}", format_hours(summary.hours_total));
    let _ = writeln!(out, "  Gross pay: {}", format_currency(summary.gross_pay));
    for deduction in &summary.applied_deductions {
        let _ = writeln!(
            out,
            "    - {:<20} {:<8} {:>12}",
            truncate_string(&deduction.name, 20),
            deduction.deduction_type,
            format_currency(Some(deduction.amount))
        );
    }
    let _ = writeln!(out, "  Net pay:   {}", format_currency(summary.net_pay));
    out
}

pub fn render_dates(title: &str, dates: &[DateTime<Utc>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    for date in dates {
        let day = date.date_naive();
        let _ = writeln!(out, "  {}  {}", day.format("%a"), format_date(day));
    }
    let _ = writeln!(out, "{} occurrence(s)", dates.len());
    out
}

pub fn render_season(label: &str, range: &SeasonRange) -> String {
    format!(
        "{}\n  Starts: {}\n  Ends:   {}\n",
        label,
        range.start.to_rfc3339(),
        range.end.to_rfc3339()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_core::analytics::rank_entries;
    use rollcall_core::models::{AppliedDeduction, DeductionType};

    #[test]
    fn test_render_aggregate_with_rank() {
        let aggregate = Aggregate {
            rank: Some(2),
            team_size: Some(9),
            ..Aggregate::from_hours(10.0, 7.5)
        };
        let text = render_aggregate("Sam on Varsity", &aggregate);
        assert!(text.contains("Required:   10.0h"));
        assert!(text.contains("Attendance: 75.0%"));
        assert!(text.contains("Rank:       2 of 9"));
    }

    #[test]
    fn test_render_leaderboard_rows() {
        let entry = |id: &str, percent: f64| LeaderboardEntry {
            user_id: id.to_string(),
            display_name: String::new(),
            hours_required: 10.0,
            hours_logged: percent / 10.0,
            attendance_percent: percent,
            teams_counted: 1,
        };
        let board = rank_entries(vec![entry("ana", 40.0), entry("ben", 90.0)], |e| e.attendance_percent);
        let text = render_leaderboard("Varsity", &board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("ben") && lines[2].contains("90.0%"));
        assert!(lines[3].contains("ana"));

        assert!(render_leaderboard("Empty", &[]).contains("(no athletes)"));
    }

    #[test]
    fn test_render_payroll_unconfigured() {
        let text = render_payroll("Sam", &PayrollSummary::default());
        assert!(text.contains("Gross pay: not set"));
        assert!(text.contains("Net pay:   not set"));
    }

    #[test]
    fn test_render_payroll_lists_deductions_in_order() {
        let summary = PayrollSummary {
            hours_total: 100.0,
            gross_pay: Some(2000.0),
            net_pay: Some(1795.0),
            applied_deductions: vec![
                AppliedDeduction {
                    name: "Club fund".to_string(),
                    deduction_type: DeductionType::Percent,
                    value: 10.0,
                    amount: 200.0,
                },
                AppliedDeduction {
                    name: "Dues".to_string(),
                    deduction_type: DeductionType::Flat,
                    value: 5.0,
                    amount: 5.0,
                },
            ],
        };
        let text = render_payroll("Sam", &summary);
        let fund = text.find("Club fund").unwrap();
        let dues = text.find("Dues").unwrap();
        assert!(fund < dues);
        assert!(text.contains("Percent "));
        assert!(text.contains("$1,795.00"));
    }

    #[test]
    fn test_render_dates() {
        let dates = rollcall_core::analytics::generate_recurring_dates(
            chrono::NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2026, 9, 13).unwrap(),
            rollcall_core::models::Frequency::Weekly,
            &[1, 3],
        );
        let text = render_dates("Weekly", &dates);
        assert!(text.contains("Mon  Sep 07, 2026"));
        assert!(text.contains("Wed  Sep 09, 2026"));
        assert!(text.ends_with("2 occurrence(s)\n"));
    }
}
