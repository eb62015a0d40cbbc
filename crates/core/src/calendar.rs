//! Weekly and monthly calendar computation for the dashboard.
//!
//! Pure functions of `(today, offset)` plus the set of dates that already
//! have an entry. Weeks start on Monday.

use std::collections::HashSet;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::Serialize;

/// One day in the weekly dashboard strip.
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Full weekday name, e.g. `"Monday"`.
    pub weekday: &'static str,
    /// Abbreviated weekday name, e.g. `"Mon"`.
    pub weekday_short: &'static str,
    pub has_entry: bool,
    pub is_today: bool,
    pub is_past: bool,
    pub is_future: bool,
}

/// One cell in the month grid.
#[derive(Debug, Clone, Serialize)]
pub struct MonthDay {
    pub date: NaiveDate,
    /// Whether the cell belongs to the displayed month (grids are padded
    /// to full Monday-to-Sunday weeks).
    pub in_month: bool,
    pub has_entry: bool,
    pub is_today: bool,
}

/// Full weekday name.
fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Abbreviated weekday name.
fn weekday_short_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// The Monday of the week containing `today + 7 * week_offset` days.
///
/// Returns `None` when the offset lands outside the representable date
/// range; `week_offset` is caller-supplied input, not a trusted value.
pub fn week_start(today: NaiveDate, week_offset: i64) -> Option<NaiveDate> {
    let days = week_offset.checked_mul(7)?;
    let anchor = if days >= 0 {
        today.checked_add_days(Days::new(days as u64))?
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))?
    };
    anchor.checked_sub_days(Days::new(u64::from(anchor.weekday().num_days_from_monday())))
}

/// Build the 7-day week strip for `(today, week_offset)`.
///
/// Returns exactly 7 consecutive days starting on the Monday of the
/// selected week, each annotated with entry presence and its relation to
/// `today`, or `None` for an out-of-range offset.
pub fn build_week(
    today: NaiveDate,
    week_offset: i64,
    entry_dates: &HashSet<NaiveDate>,
) -> Option<Vec<DaySummary>> {
    let monday = week_start(today, week_offset)?;
    let mut days = Vec::with_capacity(7);
    for i in 0..7 {
        let date = monday.checked_add_days(Days::new(i))?;
        days.push(DaySummary {
            date,
            weekday: weekday_name(date.weekday()),
            weekday_short: weekday_short_name(date.weekday()),
            has_entry: entry_dates.contains(&date),
            is_today: date == today,
            is_past: date < today,
            is_future: date > today,
        });
    }
    Some(days)
}

/// Build the Monday-first month grid for `(year, month)`.
///
/// The grid is padded to full weeks, so it always contains between 4 and 6
/// rows of 7 cells; padding cells carry `in_month: false`.
pub fn build_month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    entry_dates: &HashSet<NaiveDate>,
) -> Result<Vec<Vec<MonthDay>>, String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| format!("Invalid year/month: {year}-{month}"))?;
    let last = first + Months::new(1) - Days::new(1);

    // Pad back to the Monday on or before the 1st.
    let mut cursor = first - Days::new(u64::from(first.weekday().num_days_from_monday()));

    let mut weeks = Vec::new();
    while cursor <= last {
        let week: Vec<MonthDay> = (0..7)
            .map(|i| {
                let date = cursor + Days::new(i);
                MonthDay {
                    date,
                    in_month: date.month() == month,
                    has_entry: entry_dates.contains(&date),
                    is_today: date == today,
                }
            })
            .collect();
        cursor = cursor + Days::new(7);
        weeks.push(week);
    }

    Ok(weeks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- week_start ----------------------------------------------------------

    #[test]
    fn week_start_midweek() {
        // 2024-06-12 is a Wednesday; its Monday is 2024-06-10.
        assert_eq!(week_start(date(2024, 6, 12), 0), Some(date(2024, 6, 10)));
    }

    #[test]
    fn week_start_on_monday_is_identity() {
        assert_eq!(week_start(date(2024, 6, 10), 0), Some(date(2024, 6, 10)));
    }

    #[test]
    fn week_start_on_sunday() {
        assert_eq!(week_start(date(2024, 6, 16), 0), Some(date(2024, 6, 10)));
    }

    #[test]
    fn week_start_with_offsets() {
        assert_eq!(week_start(date(2024, 6, 12), 1), Some(date(2024, 6, 17)));
        assert_eq!(week_start(date(2024, 6, 12), -1), Some(date(2024, 6, 3)));
        // Offsets cross month boundaries.
        assert_eq!(week_start(date(2024, 6, 12), 3), Some(date(2024, 7, 1)));
    }

    #[test]
    fn week_start_out_of_range_offset_is_none() {
        let today = date(2024, 6, 12);
        assert_eq!(week_start(today, 4_000_000_000_000_000_000), None);
        assert_eq!(week_start(today, -4_000_000_000_000_000_000), None);
        assert_eq!(week_start(today, i64::MIN), None);
        assert!(build_week(today, i64::MAX, &HashSet::new()).is_none());
    }

    // -- build_week ----------------------------------------------------------

    #[test]
    fn week_is_seven_consecutive_days_from_monday() {
        let today = date(2024, 6, 12); // Wednesday
        let week = build_week(today, 0, &HashSet::new()).unwrap();

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date(2024, 6, 10));
        assert_eq!(week[6].date, date(2024, 6, 16));
        for (i, day) in week.iter().enumerate() {
            assert_eq!(day.date, date(2024, 6, 10) + Days::new(i as u64));
        }
        assert_eq!(week[0].weekday, "Monday");
        assert_eq!(week[0].weekday_short, "Mon");
        assert_eq!(week[6].weekday, "Sunday");
    }

    #[test]
    fn today_past_future_flags() {
        let today = date(2024, 6, 12);
        let week = build_week(today, 0, &HashSet::new()).unwrap();

        assert!(week[2].is_today);
        assert!(!week[2].is_past && !week[2].is_future);
        assert!(week[0].is_past && !week[0].is_today);
        assert!(week[6].is_future && !week[6].is_today);
    }

    #[test]
    fn entry_presence_marked() {
        let today = date(2024, 6, 12);
        let entries: HashSet<NaiveDate> = [date(2024, 6, 10), date(2024, 6, 12)].into();
        let week = build_week(today, 0, &entries).unwrap();

        assert!(week[0].has_entry);
        assert!(!week[1].has_entry);
        assert!(week[2].has_entry);
    }

    #[test]
    fn offset_week_has_no_today() {
        let today = date(2024, 6, 12);
        let week = build_week(today, 2, &HashSet::new()).unwrap();
        assert!(week.iter().all(|d| !d.is_today));
        assert!(week.iter().all(|d| d.is_future));
    }

    // -- build_month_grid ----------------------------------------------------

    #[test]
    fn june_2024_grid_shape() {
        // June 2024: the 1st is a Saturday, the 30th a Sunday.
        let grid = build_month_grid(2024, 6, date(2024, 6, 12), &HashSet::new()).unwrap();

        // Padded back to Monday 2024-05-27; 5 full weeks cover the month.
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0].date, date(2024, 5, 27));
        assert!(!grid[0][0].in_month);
        assert_eq!(grid[0][5].date, date(2024, 6, 1));
        assert!(grid[0][5].in_month);
        assert_eq!(grid[4][6].date, date(2024, 6, 30));
        assert!(grid[4][6].in_month);
        for week in &grid {
            assert_eq!(week.len(), 7);
        }
    }

    #[test]
    fn month_starting_on_monday_has_no_leading_padding() {
        // July 2024 starts on a Monday.
        let grid = build_month_grid(2024, 7, date(2024, 7, 15), &HashSet::new()).unwrap();
        assert_eq!(grid[0][0].date, date(2024, 7, 1));
        assert!(grid[0][0].in_month);
    }

    #[test]
    fn grid_marks_entries_and_today() {
        let entries: HashSet<NaiveDate> = [date(2024, 6, 3)].into();
        let grid = build_month_grid(2024, 6, date(2024, 6, 3), &entries).unwrap();

        // 2024-06-03 is the first Monday inside the month (second grid row).
        let cell = &grid[1][0];
        assert_eq!(cell.date, date(2024, 6, 3));
        assert!(cell.has_entry);
        assert!(cell.is_today);
    }

    #[test]
    fn invalid_month_rejected() {
        assert!(build_month_grid(2024, 13, date(2024, 6, 1), &HashSet::new()).is_err());
        assert!(build_month_grid(2024, 0, date(2024, 6, 1), &HashSet::new()).is_err());
    }

    #[test]
    fn february_leap_year() {
        let grid = build_month_grid(2024, 2, date(2024, 2, 29), &HashSet::new()).unwrap();
        let last_in_month = grid
            .iter()
            .flatten()
            .filter(|c| c.in_month)
            .map(|c| c.date)
            .max()
            .unwrap();
        assert_eq!(last_in_month, date(2024, 2, 29));
    }
}
