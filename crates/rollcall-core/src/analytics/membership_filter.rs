//! Restricts candidate events to the days a user was actually on the team.

use tracing::debug;

use super::season_range::SeasonRange;
use crate::error::{EngineError, Result};
use crate::models::{Event, MembershipPeriod};

/// Keep events whose calendar day falls inside at least one period.
///
/// Comparison is by day, not instant: membership boundaries are
/// day-granular, so an evening practice on the day someone left still
/// counts. Input order is preserved. An empty period list keeps nothing;
/// callers substitute a full-season period via [`resolve_periods`].
pub fn filter_events_by_membership<'a, I>(events: I, periods: &[MembershipPeriod]) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| periods.iter().any(|p| p.contains_day(event.date)))
        .collect()
}

/// Check that periods are well formed and do not overlap.
pub fn validate_periods(periods: &[MembershipPeriod]) -> Result<()> {
    for period in periods {
        if let Some(left_at) = period.left_at {
            if left_at < period.joined_at {
                return Err(EngineError::InvalidMembershipPeriod {
                    joined_at: period.joined_at,
                    left_at,
                });
            }
        }
    }

    let mut sorted = periods.to_vec();
    sorted.sort_by_key(|p| p.joined_at);

    for pair in sorted.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        let overlaps = match previous.left_at {
            Some(left_at) => left_at > next.joined_at,
            None => true,
        };
        if overlaps {
            return Err(EngineError::OverlappingMembership {
                joined_at: next.joined_at,
                previous_left_at: previous.left_at,
            });
        }
    }

    Ok(())
}

/// Resolve a member's history once, at the boundary.
///
/// Missing or empty history (records from before join tracking) becomes a
/// single synthetic period spanning the whole season. Real history is
/// validated and returned in canonical `joined_at` order.
pub fn resolve_periods(
    periods: Option<&[MembershipPeriod]>,
    range: &SeasonRange,
) -> Result<Vec<MembershipPeriod>> {
    match periods {
        Some(periods) if !periods.is_empty() => {
            validate_periods(periods)?;
            let mut sorted = periods.to_vec();
            sorted.sort_by_key(|p| p.joined_at);
            Ok(sorted)
        }
        _ => {
            debug!("No membership history, assuming membership for the whole season");
            Ok(vec![MembershipPeriod::new(range.start, Some(range.end))])
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
