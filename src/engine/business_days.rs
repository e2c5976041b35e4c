//! Business-Day Counter: weekdays in an inclusive range, minus holidays.
//!
//! Pure once the holiday set is supplied, which keeps it deterministic and
//! unit-testable independent of storage.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::EngineError;

/// Count days in `[start, end]` that are neither Saturday/Sunday nor in
/// `holidays`. Rejects with `InvalidRange` when start > end.
pub fn count_business_days(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HashSet<NaiveDate>,
) -> Result<u32, EngineError> {
    if start > end {
        return Err(EngineError::InvalidRange(
            "start date must not be after end date".to_string(),
        ));
    }

    let mut total = 0;
    let mut current = start;
    loop {
        if !is_weekend(current) && !holidays.contains(&current) {
            total += 1;
        }
        if current == end {
            break;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(total)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        let err = count_business_days(d(2025, 3, 10), d(2025, 3, 9), &HashSet::new());
        assert!(matches!(err, Err(EngineError::InvalidRange(_))));
    }

    #[test]
    fn single_weekday_counts_one() {
        // 2025-03-10 is a Monday
        let n = count_business_days(d(2025, 3, 10), d(2025, 3, 10), &HashSet::new()).unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn all_weekday_range_counts_inclusive_days() {
        // Mon..Fri with no holidays: end - start + 1
        let n = count_business_days(d(2025, 3, 10), d(2025, 3, 14), &HashSet::new()).unwrap();
        assert_eq!(n, 5);
    }

    #[test]
    fn weekends_are_skipped() {
        // Fri 2025-03-14 through Mon 2025-03-17: Fri + Mon only
        let n = count_business_days(d(2025, 3, 14), d(2025, 3, 17), &HashSet::new()).unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn weekend_only_range_counts_zero() {
        let n = count_business_days(d(2025, 3, 15), d(2025, 3, 16), &HashSet::new()).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn weekday_holidays_are_excluded() {
        // Independence Day 2025 falls on a Friday
        let holidays = HashSet::from([d(2025, 7, 4)]);
        let n = count_business_days(d(2025, 6, 30), d(2025, 7, 4), &holidays).unwrap();
        assert_eq!(n, 4);
    }

    #[test]
    fn holiday_on_weekend_changes_nothing() {
        let with = HashSet::from([d(2025, 3, 15)]); // a Saturday
        let without = HashSet::new();
        let range = (d(2025, 3, 10), d(2025, 3, 21));
        assert_eq!(
            count_business_days(range.0, range.1, &with).unwrap(),
            count_business_days(range.0, range.1, &without).unwrap(),
        );
    }
}
