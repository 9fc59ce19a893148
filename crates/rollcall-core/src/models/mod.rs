//! Data models for attendance records.
//!
//! This module contains the shapes the storage layer hands to the engine
//! and the aggregates the engine hands back:
//!
//! - `Season`, `MembershipPeriod`: the calendar and join/leave history
//! - `Event`, `RecurringSchedule`: scheduled sessions and their templates
//! - `CheckIn`: per-user attendance records
//! - `Team`, `TeamMember`, `Organization`: roster structure
//! - Payroll types: `DeductionRule`, `PayProfile`, `PayrollSummary`
//! - `Aggregate`: derived hours and attendance for one scope

pub mod aggregate;
pub mod check_in;
pub mod event;
pub mod membership;
pub mod organization;
pub mod payroll;
pub mod season;
pub mod team;

pub use aggregate::{attendance_percent, Aggregate};
pub use check_in::{CheckIn, CheckInStatus};
pub use event::{Event, Frequency, RecurrenceRule, RecurringSchedule};
pub use membership::MembershipPeriod;
pub use organization::{Organization, OrganizationMember, Snapshot};
pub use payroll::{
    AppliedDeduction, Compensation, DeductionRule, DeductionType, PayProfile, PayrollSummary,
};
pub use season::Season;
pub use team::{MemberRole, Team, TeamMember};
