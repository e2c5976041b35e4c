//! Calendar Resolver: fixed and floating corporate holidays for a year,
//! lazily synced into the Ledger before use.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use sqlx::PgPool;

use crate::error::EngineError;
use crate::model::CorporateHoliday;
use crate::store;

/// The hard-coded corporate holiday set for one year, in calendar order.
///
/// Fixed dates: New Year's Day, Independence Day, Christmas Day.
/// Weekday rules: last Monday of May, first Monday of September, fourth
/// Thursday of November.
pub fn holiday_rules(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let jan_1 = ymd(year, 1, 1);
    let jul_4 = ymd(year, 7, 4);
    let dec_25 = ymd(year, 12, 25);

    // Last Monday of May: walk back from May 31.
    let may_31 = ymd(year, 5, 31);
    let memorial_day = may_31 - Duration::days(days_since(may_31, Weekday::Mon));

    // First Monday of September.
    let sep_1 = ymd(year, 9, 1);
    let labor_day = sep_1 + Duration::days(days_until(sep_1, Weekday::Mon));

    // Fourth Thursday of November.
    let nov_1 = ymd(year, 11, 1);
    let thanksgiving = nov_1 + Duration::days(days_until(nov_1, Weekday::Thu)) + Duration::weeks(3);

    let mut holidays = vec![
        (jan_1, "New Year's Day"),
        (memorial_day, "Memorial Day"),
        (jul_4, "Independence Day"),
        (labor_day, "Labor Day"),
        (thanksgiving, "Thanksgiving"),
        (dec_25, "Christmas Day"),
    ];
    holidays.sort_by_key(|(date, _)| *date);
    holidays
}

/// Ensure the holiday rows for `year` exist in the Ledger and return the full
/// set (existing + newly inserted), ordered by date.
///
/// Safe to call redundantly and under concurrent first-touch: each row is an
/// idempotent upsert keyed by the unique date, and the Ledger is the single
/// source of truth for what is read back.
pub async fn ensure_holidays(pool: &PgPool, year: i32) -> Result<Vec<CorporateHoliday>, EngineError> {
    for (date, name) in holiday_rules(year) {
        store::upsert_holiday(pool, name, date, year).await?;
    }

    Ok(store::holidays_for_year(pool, year).await?)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn days_since(date: NaiveDate, target: Weekday) -> i64 {
    ((7 + date.weekday().num_days_from_monday() - target.num_days_from_monday()) % 7) as i64
}

fn days_until(date: NaiveDate, target: Weekday) -> i64 {
    ((7 + target.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(year: i32) -> Vec<NaiveDate> {
        holiday_rules(year).into_iter().map(|(d, _)| d).collect()
    }

    #[test]
    fn fixed_holidays_every_year() {
        for year in [2023, 2024, 2025, 2026] {
            let set = dates(year);
            assert!(set.contains(&ymd(year, 1, 1)));
            assert!(set.contains(&ymd(year, 7, 4)));
            assert!(set.contains(&ymd(year, 12, 25)));
        }
    }

    #[test]
    fn floating_holidays_2025() {
        let set = dates(2025);
        assert!(set.contains(&ymd(2025, 5, 26)), "Memorial Day 2025");
        assert!(set.contains(&ymd(2025, 9, 1)), "Labor Day 2025");
        assert!(set.contains(&ymd(2025, 11, 27)), "Thanksgiving 2025");
    }

    #[test]
    fn floating_holidays_2024() {
        let set = dates(2024);
        assert!(set.contains(&ymd(2024, 5, 27)), "Memorial Day 2024");
        assert!(set.contains(&ymd(2024, 9, 2)), "Labor Day 2024");
        assert!(set.contains(&ymd(2024, 11, 28)), "Thanksgiving 2024");
    }

    #[test]
    fn six_unique_sorted_dates() {
        for year in 2020..2030 {
            let set = dates(year);
            assert_eq!(set.len(), 6);
            let mut deduped = set.clone();
            deduped.dedup();
            assert_eq!(deduped.len(), 6, "duplicate holiday date in {year}");
            assert!(set.windows(2).all(|w| w[0] < w[1]), "unsorted in {year}");
        }
    }

    #[test]
    fn rules_are_deterministic() {
        assert_eq!(holiday_rules(2025), holiday_rules(2025));
    }

    #[test]
    fn floating_rules_land_on_expected_weekday() {
        for year in 2020..2030 {
            let rules = holiday_rules(year);
            for (date, name) in rules {
                match name {
                    "Memorial Day" | "Labor Day" => assert_eq!(date.weekday(), Weekday::Mon),
                    "Thanksgiving" => assert_eq!(date.weekday(), Weekday::Thu),
                    _ => {}
                }
            }
        }
    }
}
