//! Display helpers for reports.

pub mod format;

pub use format::{format_currency, format_date, format_hours, format_percent, truncate_string};
