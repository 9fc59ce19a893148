//! Expansion of recurrence rules into concrete dates.
//!
//! All arithmetic uses UTC calendar fields so the output does not depend on
//! the server's locale. Generated instants sit at noon to keep them on the
//! right calendar day for any viewer within twelve hours of UTC.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::models::Frequency;

/// Time of day every generated occurrence is pinned to
const OCCURRENCE_HOUR: u32 = 12;

/// Generate occurrence dates between `start_date` and `end_date`, inclusive.
///
/// `days_of_week` uses 0 = Sunday through 6 = Saturday and only applies to
/// weekly and biweekly rules. Biweekly rules fire on even-numbered weeks
/// counted from the Sunday-started week containing `start_date`. Monthly
/// rules repeat `start_date`'s day of month and skip months that are too
/// short instead of rolling over.
pub fn generate_recurring_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
    frequency: Frequency,
    days_of_week: &[u8],
) -> Vec<DateTime<Utc>> {
    if end_date < start_date {
        return Vec::new();
    }

    let dates: Vec<NaiveDate> = match frequency {
        Frequency::Daily => start_date.iter_days().take_while(|d| *d <= end_date).collect(),
        Frequency::Weekly => start_date
            .iter_days()
            .take_while(|d| *d <= end_date)
            .filter(|d| matches_weekday(*d, days_of_week))
            .collect(),
        Frequency::Biweekly => {
            let first_week_start = week_start(start_date);
            start_date
                .iter_days()
                .take_while(|d| *d <= end_date)
                .filter(|d| matches_weekday(*d, days_of_week))
                .filter(|d| ((*d - first_week_start).num_days() / 7) % 2 == 0)
                .collect()
        }
        Frequency::Monthly => monthly_dates(start_date, end_date),
    };

    dates.into_iter().filter_map(at_noon).collect()
}

fn matches_weekday(day: NaiveDate, days_of_week: &[u8]) -> bool {
    let weekday = day.weekday().num_days_from_sunday();
    days_of_week.iter().any(|d| u32::from(*d) == weekday)
}

/// Sunday that begins the week containing `day`
fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_sunday()))
}

fn monthly_dates(start_date: NaiveDate, end_date: NaiveDate) -> Vec<NaiveDate> {
    let day_of_month = start_date.day();
    let (mut year, mut month) = (start_date.year(), start_date.month());
    let mut dates = Vec::new();

    while (year, month) <= (end_date.year(), end_date.month()) {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day_of_month) {
            if date >= start_date && date <= end_date {
                dates.push(date);
            }
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    dates
}

fn at_noon(day: NaiveDate) -> Option<DateTime<Utc>> {
    NaiveTime::from_hms_opt(OCCURRENCE_HOUR, 0, 0).map(|noon| day.and_time(noon).and_utc())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Weekday};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days(dates: &[DateTime<Utc>]) -> Vec<NaiveDate> {
        dates.iter().map(|d| d.date_naive()).collect()
    }

    #[test]
    fn test_weekly_monday_wednesday_over_two_weeks() {
        // 2026-09-07 is a Monday
        let dates = generate_recurring_dates(day(2026, 9, 7), day(2026, 9, 20), Frequency::Weekly, &[1, 3]);
        assert_eq!(dates.len(), 4);
        for date in &dates {
            let weekday = date.weekday();
            assert!(weekday == Weekday::Mon || weekday == Weekday::Wed);
            assert_eq!(date.hour(), 12);
        }
        assert_eq!(
            days(&dates),
            vec![day(2026, 9, 7), day(2026, 9, 9), day(2026, 9, 14), day(2026, 9, 16)]
        );
    }

    #[test]
    fn test_daily_is_inclusive_and_ignores_weekdays() {
        let dates = generate_recurring_dates(day(2026, 2, 27), day(2026, 3, 2), Frequency::Daily, &[3]);
        assert_eq!(
            days(&dates),
            vec![day(2026, 2, 27), day(2026, 2, 28), day(2026, 3, 1), day(2026, 3, 2)]
        );
    }

    #[test]
    fn test_biweekly_skips_odd_weeks() {
        // Starts Wednesday 2026-09-09; its week began Sunday 2026-09-06
        let dates =
            generate_recurring_dates(day(2026, 9, 9), day(2026, 10, 10), Frequency::Biweekly, &[2, 4]);
        assert_eq!(
            days(&dates),
            vec![day(2026, 9, 10), day(2026, 9, 22), day(2026, 9, 24), day(2026, 10, 6), day(2026, 10, 8)]
        );
    }

    #[test]
    fn test_monthly_skips_short_months() {
        let dates =
            generate_recurring_dates(day(2026, 1, 31), day(2026, 6, 30), Frequency::Monthly, &[]);
        assert_eq!(days(&dates), vec![day(2026, 1, 31), day(2026, 3, 31), day(2026, 5, 31)]);
    }

    #[test]
    fn test_monthly_across_year_end() {
        let dates =
            generate_recurring_dates(day(2025, 11, 15), day(2026, 2, 14), Frequency::Monthly, &[]);
        assert_eq!(days(&dates), vec![day(2025, 11, 15), day(2025, 12, 15), day(2026, 1, 15)]);
    }

    #[test]
    fn test_inverted_bounds_and_empty_weekdays() {
        assert!(generate_recurring_dates(day(2026, 5, 2), day(2026, 5, 1), Frequency::Daily, &[]).is_empty());
        assert!(generate_recurring_dates(day(2026, 5, 1), day(2026, 5, 31), Frequency::Weekly, &[]).is_empty());
    }

    #[test]
    fn test_duplicate_weekdays_do_not_duplicate_dates() {
        let dates = generate_recurring_dates(day(2026, 9, 7), day(2026, 9, 13), Frequency::Weekly, &[1, 1, 1]);
        assert_eq!(days(&dates), vec![day(2026, 9, 7)]);
    }
}
