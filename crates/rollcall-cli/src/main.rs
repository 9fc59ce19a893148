//! Rollcall CLI - attendance, leaderboard and payroll reports.
//!
//! Reads a record snapshot exported by the storage layer and prints one
//! report per invocation, as text or JSON.

mod args;
mod config;
mod report;

use std::io;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Command};
use config::{Config, DATA_ENV, NOW_ENV};
use rollcall_core::analytics::{
    aggregate_org_hours, compute_payroll, generate_recurring_dates, member_scopes,
    member_standing, organization_leaderboard, resolve_season_range, streaks_for_user,
    team_leaderboard, team_rankings,
};
use rollcall_core::models::{Season, Snapshot};
use rollcall_core::utils::format_date;

// ============================================================================
// Constants
// ============================================================================

/// Log level when RUST_LOG is not set
const DEFAULT_LOG_LEVEL: &str = "warn";

/// File name prefix for daily log files in the configured log directory
const LOG_FILE_PREFIX: &str = "rollcall.log";

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr, and additionally to a daily file when a log directory
/// is configured. The returned guard must live until exit so buffered file
/// output is flushed.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let _guard = init_tracing(config.log_dir.as_deref());
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    run(cli, &config)
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    let Cli {
        data,
        now,
        limit,
        json,
        command,
    } = cli;
    let now = resolve_now(now)?;
    let load = || load_snapshot(config, data.as_deref());

    match command {
        Command::Hours { user_id, team_id } => {
            let snapshot = load()?;
            let events = snapshot.all_events();
            let name = snapshot.display_name(&user_id);

            match team_id {
                Some(team_id) => {
                    let team = snapshot
                        .team(&team_id)
                        .ok_or_else(|| anyhow!("Unknown team: {}", team_id))?;
                    let standing = member_standing(team, &user_id, &events, &snapshot.check_ins, now)?
                        .ok_or_else(|| anyhow!("{} is not on team {}", name, team.name))?;
                    let mut title = format!("{} on {}", name, team.name);
                    if let Some(season) = team.season.as_ref() {
                        title.push_str(&format!(" ({})", season.label()));
                    }
                    emit(json, &standing, || report::render_aggregate(&title, &standing))
                }
                None => {
                    let scopes = member_scopes(&snapshot.teams, &user_id);
                    if scopes.is_empty() {
                        bail!("{} is not on any team", name);
                    }
                    let aggregate =
                        aggregate_org_hours(&user_id, &scopes, &events, &snapshot.check_ins, now)?;
                    let title = format!("{} across {} team(s)", name, scopes.len());
                    emit(json, &aggregate, || report::render_aggregate(&title, &aggregate))
                }
            }
        }
        Command::Streaks { user_id } => {
            let snapshot = load()?;
            let streaks = streaks_for_user(&user_id, &snapshot.check_ins, &snapshot.all_events());
            let name = snapshot.display_name(&user_id);
            emit(json, &streaks, || report::render_streaks(&name, &streaks))
        }
        Command::Leaderboard { team_id } => {
            let snapshot = load()?;
            let team = snapshot
                .team(&team_id)
                .ok_or_else(|| anyhow!("Unknown team: {}", team_id))?;
            let limit = config.leaderboard_limit(limit);
            let board = team_leaderboard(team, &snapshot.all_events(), &snapshot.check_ins, now, Some(limit))?;
            emit(json, &board, || report::render_leaderboard(&team.name, &board))
        }
        Command::OrgLeaderboard => {
            let snapshot = load()?;
            let limit = config.leaderboard_limit(limit);
            let board = organization_leaderboard(
                &snapshot.teams,
                &snapshot.all_events(),
                &snapshot.check_ins,
                now,
                Some(limit),
            )?;
            let title = snapshot.organization.name.clone();
            emit(json, &board, || report::render_leaderboard(&title, &board))
        }
        Command::TeamRankings => {
            let snapshot = load()?;
            let rankings = team_rankings(&snapshot.teams, &snapshot.all_events(), &snapshot.check_ins, now)?;
            emit(json, &rankings, || report::render_team_rankings(&rankings))
        }
        Command::Payroll { user_id } => {
            let snapshot = load()?;
            let scopes = member_scopes(&snapshot.teams, &user_id);
            let hours_total = if scopes.is_empty() {
                0.0
            } else {
                aggregate_org_hours(&user_id, &scopes, &snapshot.all_events(), &snapshot.check_ins, now)?
                    .hours_logged
            };
            let compensation = snapshot
                .organization
                .member(&user_id)
                .and_then(|m| m.pay.compensation());
            if compensation.is_none() {
                info!(user_id = %user_id, "No hourly rate or salary configured");
            }
            let summary = compute_payroll(hours_total, compensation.as_ref(), &snapshot.organization.deductions)?;
            let name = snapshot.display_name(&user_id);
            emit(json, &summary, || report::render_payroll(&name, &summary))
        }
        Command::Schedule {
            start,
            end,
            frequency,
            days_of_week,
        } => {
            let dates = generate_recurring_dates(start, end, frequency, &days_of_week);
            let title = format!("{} from {} to {}", frequency, format_date(start), format_date(end));
            emit(json, &dates, || report::render_dates(&title, &dates))
        }
        Command::Season {
            start_month,
            end_month,
            year,
        } => {
            let range = resolve_season_range(start_month, end_month, year)?;
            let label = Season::new(start_month, end_month, year).label();
            emit(json, &range, || report::render_season(&label, &range))
        }
        Command::Init { data_file } => {
            let mut updated = config.clone();
            updated.data_file = Some(data_file);
            let path = updated.save()?;
            println!("Saved config to {}", path.display());
            Ok(())
        }
    }
}

/// Report clock: `--now`, then `ROLLCALL_NOW`, then the system clock
fn resolve_now(flag: Option<DateTime<Utc>>) -> Result<DateTime<Utc>> {
    if let Some(now) = flag {
        return Ok(now);
    }
    match std::env::var(NOW_ENV) {
        Ok(value) if !value.is_empty() => args::parse_now(&value).map_err(|e| anyhow!("{}: {}", NOW_ENV, e)),
        _ => Ok(Utc::now()),
    }
}

fn load_snapshot(config: &Config, data: Option<&Path>) -> Result<Snapshot> {
    let path = config
        .data_file(data, std::env::var(DATA_ENV).ok())
        .ok_or_else(|| {
            anyhow!(
                "No snapshot file given. Pass --data, set {}, or run `rollcall init <file>`",
                DATA_ENV
            )
        })?;

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let snapshot = Snapshot::from_json(&contents)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;

    info!(
        path = %path.display(),
        teams = snapshot.teams.len(),
        events = snapshot.events.len(),
        schedules = snapshot.schedules.len(),
        check_ins = snapshot.check_ins.len(),
        exported_at = ?snapshot.exported_at,
        "Loaded snapshot"
    );
    Ok(snapshot)
}

fn emit<T, F>(json: bool, value: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render());
    }
    Ok(())
}
