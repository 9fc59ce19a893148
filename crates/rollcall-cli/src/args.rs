//! Command-line arguments.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rollcall_core::models::Frequency;

#[derive(Debug, Parser)]
#[command(name = "rollcall", version)]
#[command(about = "Attendance, leaderboard and payroll reports over an exported snapshot", long_about = None)]
pub struct Cli {
    /// Snapshot file (overrides ROLLCALL_DATA and the saved config)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Report clock as RFC 3339 (defaults to ROLLCALL_NOW, then the system clock)
    #[arg(long, global = true, value_name = "RFC3339", value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Maximum leaderboard rows
    #[arg(long, global = true, value_name = "N")]
    pub limit: Option<usize>,

    /// Print JSON instead of a text report
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Hours and attendance, on one team or across all of the user's teams
    Hours {
        #[arg(value_name = "USER")]
        user_id: String,
        #[arg(value_name = "TEAM")]
        team_id: Option<String>,
    },
    /// Current and best attendance streaks
    Streaks {
        #[arg(value_name = "USER")]
        user_id: String,
    },
    /// Athletes on one team ranked by attendance
    Leaderboard {
        #[arg(value_name = "TEAM")]
        team_id: String,
    },
    /// Athletes across current-season teams ranked by average attendance
    OrgLeaderboard,
    /// Current-season teams ranked by attendance
    TeamRankings,
    /// Gross pay, deductions and net pay
    Payroll {
        #[arg(value_name = "USER")]
        user_id: String,
    },
    /// Preview recurring dates
    Schedule {
        #[arg(value_parser = parse_date)]
        start: NaiveDate,
        #[arg(value_parser = parse_date)]
        end: NaiveDate,
        /// daily, weekly, biweekly or monthly
        frequency: Frequency,
        /// Days of week, 0 = Sunday through 6 = Saturday (e.g. 1,3)
        #[arg(value_name = "DAYS", value_delimiter = ',', value_parser = clap::value_parser!(u8).range(0..=6))]
        days_of_week: Vec<u8>,
    },
    /// Resolve a season's date range
    Season {
        start_month: u32,
        end_month: u32,
        year: i32,
    },
    /// Save the default snapshot path to config
    Init { data_file: PathBuf },
}

pub fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp {value:?} (expected RFC 3339): {e}"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date {value:?} (expected YYYY-MM-DD): {e}"))
}
