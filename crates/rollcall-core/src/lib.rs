//! Rollcall core - attendance aggregation for seasonal team schedules.
//!
//! Derives hours required, hours logged, attendance percentages, streaks,
//! leaderboards and payroll from raw event and check-in records. The crate
//! does no I/O: a storage layer hands over materialized records (see
//! [`models::Snapshot`]) and the functions in [`analytics`] return computed
//! aggregates.

pub mod analytics;
pub mod error;
pub mod models;
pub mod utils;

pub use error::{EngineError, Result};
