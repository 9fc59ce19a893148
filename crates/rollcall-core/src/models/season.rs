use serde::{Deserialize, Serialize};

use crate::analytics::season_range::{resolve_season_range, SeasonRange};
use crate::error::Result;

/// An organization-defined annual window, e.g. September through June.
///
/// When `end_month < start_month` the season wraps into the following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Season {
    #[serde(rename = "startMonth")]
    pub start_month: u32,
    #[serde(rename = "endMonth")]
    pub end_month: u32,
    pub year: i32,
}

impl Season {
    pub fn new(start_month: u32, end_month: u32, year: i32) -> Self {
        Self {
            start_month,
            end_month,
            year,
        }
    }

    /// Whether the season crosses a year boundary
    pub fn wraps_year(&self) -> bool {
        self.end_month < self.start_month
    }

    /// Concrete calendar interval covered by this season
    pub fn range(&self) -> Result<SeasonRange> {
        resolve_season_range(self.start_month, self.end_month, self.year)
    }

    /// Short label for reports: "Sep 2025 - Jun 2026"
    pub fn label(&self) -> String {
        let end_year = if self.wraps_year() { self.year + 1 } else { self.year };
        format!(
            "{} {} - {} {}",
            month_abbrev(self.start_month),
            self.year,
            month_abbrev(self.end_month),
            end_year
        )
    }
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}
