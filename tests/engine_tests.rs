//! Cross-module behavior of the vacation engine: calendar rules feeding the
//! business-day counter, balances reacting to request lifecycle changes, and
//! validation ordering as an adapter would observe it.

use std::collections::HashSet;

use chrono::NaiveDate;

use vacay::engine::{accrual, business_days, calendar, validate};
use vacay::error::EngineError;
use vacay::model::{RequestKind, VacationRequest};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Holiday dates for every year a range touches, as the service layer builds
/// them before counting.
fn holidays_spanning(start: NaiveDate, end: NaiveDate) -> HashSet<NaiveDate> {
    use chrono::Datelike;
    let mut dates = HashSet::new();
    for year in start.year()..=end.year() {
        for (date, _) in calendar::holiday_rules(year) {
            dates.insert(date);
        }
    }
    dates
}

fn request(kind: &str, status: &str, start: NaiveDate, end: NaiveDate, days: i32) -> VacationRequest {
    VacationRequest {
        id: 0,
        employee_id: 1,
        vacation_type: kind.to_string(),
        start_date: start,
        end_date: end,
        business_days: days,
        notes: String::new(),
        status: status.to_string(),
        created_at: None,
    }
}

#[test]
fn year_boundary_range_counts_holidays_from_both_years() {
    // Fri 2024-12-20 through Fri 2025-01-03: four weekend days, Christmas
    // and New Year's Day drop out, nine working days remain.
    let start = d(2024, 12, 20);
    let end = d(2025, 1, 3);

    let holidays = holidays_spanning(start, end);
    assert!(holidays.contains(&d(2024, 12, 25)));
    assert!(holidays.contains(&d(2025, 1, 1)));

    let days = business_days::count_business_days(start, end, &holidays).unwrap();
    assert_eq!(days, 9);
}

#[test]
fn thanksgiving_week_loses_exactly_one_day() {
    let start = d(2025, 11, 24);
    let end = d(2025, 11, 28);

    let days = business_days::count_business_days(start, end, &holidays_spanning(start, end)).unwrap();
    assert_eq!(days, 4);
}

#[test]
fn full_july_week_skips_independence_day() {
    // Mon 2025-06-30 through Fri 2025-07-04; July 4 is a Friday.
    let start = d(2025, 6, 30);
    let end = d(2025, 7, 4);

    let days = business_days::count_business_days(start, end, &holidays_spanning(start, end)).unwrap();
    assert_eq!(days, 4);
}

#[test]
fn cancelling_a_request_restores_the_balance() {
    let hire = d(2023, 1, 10);
    let today = d(2025, 6, 1);
    let approved = vec![request("vacation", "approved", d(2025, 3, 3), d(2025, 3, 7), 5)];

    let before = accrual::compute_balance(hire, 2025, today, 12, &approved);
    assert_eq!(before.vacation_used, 5);

    // Same row after cancellation: usage and availability revert.
    let cancelled = vec![request("vacation", "cancelled", d(2025, 3, 3), d(2025, 3, 7), 5)];
    let after = accrual::compute_balance(hire, 2025, today, 12, &cancelled);
    assert_eq!(after.vacation_used, 0);
    assert_eq!(after.vacation_available, before.vacation_available + 5);
}

#[test]
fn optional_holidays_never_carry_over() {
    // No optional holidays used this year: the allotment is exactly the
    // yearly grant regardless of prior-year usage.
    let snapshot = accrual::compute_balance(d(2020, 1, 1), 2025, d(2025, 2, 1), 0, &[]);
    assert_eq!(
        snapshot.optional_holidays_available,
        accrual::OPTIONAL_HOLIDAY_ALLOTMENT
    );
}

#[test]
fn inverted_range_rejected_before_kind_parsing() {
    let today = d(2025, 6, 2);
    let err = validate::validate_request("not-a-kind", d(2025, 7, 10), d(2025, 7, 1), today)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidRange(_)));
}

#[test]
fn past_range_rejected_before_kind_parsing() {
    let today = d(2025, 6, 2);
    let err = validate::validate_request("not-a-kind", d(2025, 5, 1), d(2025, 5, 5), today)
        .unwrap_err();
    assert!(matches!(err, EngineError::PastDate(_)));
}

#[test]
fn valid_request_resolves_its_kind() {
    let today = d(2025, 6, 2);
    let kind = validate::validate_request("optional_holiday", d(2025, 7, 1), d(2025, 7, 1), today)
        .unwrap();
    assert_eq!(kind, RequestKind::OptionalHoliday);
}

#[test]
fn started_requests_cannot_be_cancelled() {
    let today = d(2025, 6, 2);
    assert!(validate::validate_cancellation(d(2025, 6, 1), today).is_err());
    assert!(validate::validate_cancellation(d(2025, 6, 2), today).is_ok());
    assert!(validate::validate_cancellation(d(2025, 6, 3), today).is_ok());
}

#[test]
fn rejection_kinds_are_machine_checkable() {
    let today = d(2025, 6, 2);

    let range = validate::validate_request("vacation", d(2025, 7, 2), d(2025, 7, 1), today)
        .unwrap_err();
    assert_eq!(range.kind(), "invalid_range");

    let past = validate::validate_request("vacation", d(2025, 5, 1), d(2025, 5, 2), today)
        .unwrap_err();
    assert_eq!(past.kind(), "past_date");

    let kind = validate::validate_request("sabbatical", d(2025, 7, 1), d(2025, 7, 2), today)
        .unwrap_err();
    assert_eq!(kind.kind(), "invalid_kind");
}
