//! Accrual Calculator: derives a balance snapshot from the hire date, the
//! evaluation date and the year's request rows. Pure; the service layer
//! supplies the rows.

use chrono::{Datelike, NaiveDate};

use crate::model::{BalanceSnapshot, RequestKind, VacationRequest};

/// Vacation accrues at 1 day per month of tenure, capped per year.
pub const ANNUAL_VACATION_CAP: i32 = 12;
/// At most this many unused days roll into the next year.
pub const CARRYOVER_CAP: i32 = 5;
/// Fixed yearly optional-holiday allotment; never carries over.
pub const OPTIONAL_HOLIDAY_ALLOTMENT: i32 = 3;

/// Whole months elapsed from `from` to `to`, floored on the day-of-month
/// boundary: the month counts once the same day-of-month is reached again.
/// A hire date equal to `to` is day zero of accrual; a future hire yields 0.
pub fn months_elapsed(from: NaiveDate, to: NaiveDate) -> i32 {
    if from > to {
        return 0;
    }

    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0)
}

/// Accrued vacation days as of a date: tenure in whole months, capped at the
/// yearly pool. Mid-year hires ramp from the hire month; anyone with a year
/// or more of tenure holds the full pool.
pub fn accrued_vacation(hire_date: NaiveDate, as_of: NaiveDate) -> i32 {
    months_elapsed(hire_date, as_of).min(ANNUAL_VACATION_CAP)
}

/// Compute the balance snapshot for `year`.
///
/// * `today` caps how far accrual has progressed; evaluating a past year uses
///   that year's Dec 31.
/// * `prior_year_used` is the business-day sum of non-cancelled vacation
///   requests starting in `year - 1`.
/// * `requests` are the employee's requests starting in `year`; cancelled
///   rows are filtered out here so removed and cancelled requests count
///   identically (not at all).
///
/// Available figures are deliberately not clamped at zero: a negative value
/// means over budget and must stay visible to callers.
pub fn compute_balance(
    hire_date: NaiveDate,
    year: i32,
    today: NaiveDate,
    prior_year_used: i32,
    requests: &[VacationRequest],
) -> BalanceSnapshot {
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();
    let as_of = today.min(year_end);

    let accrued = accrued_vacation(hire_date, as_of);

    // Carryover exists only when there was a prior service year.
    let carryover = if hire_date.year() < year && hire_date <= as_of {
        let prior_year_end = NaiveDate::from_ymd_opt(year - 1, 12, 31).unwrap();
        let prior_accrued = accrued_vacation(hire_date, prior_year_end);
        (prior_accrued - prior_year_used).clamp(0, CARRYOVER_CAP)
    } else {
        0
    };

    let vacation_used: i32 = requests
        .iter()
        .filter(|r| r.is_approved() && r.is_kind(RequestKind::Vacation))
        .filter(|r| r.start_date.year() == year)
        .map(|r| r.business_days)
        .sum();

    let optional_used: i32 = requests
        .iter()
        .filter(|r| r.is_approved() && r.is_kind(RequestKind::OptionalHoliday))
        .filter(|r| r.start_date.year() == year)
        .map(|r| r.business_days)
        .sum();

    BalanceSnapshot {
        vacation_accrued: accrued,
        vacation_used,
        vacation_available: accrued + carryover - vacation_used,
        vacation_carryover: carryover,
        optional_holidays_used: optional_used,
        optional_holidays_available: OPTIONAL_HOLIDAY_ALLOTMENT - optional_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
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
    fn months_floor_on_day_of_month() {
        assert_eq!(months_elapsed(d(2024, 1, 15), d(2024, 2, 14)), 0);
        assert_eq!(months_elapsed(d(2024, 1, 15), d(2024, 2, 15)), 1);
        assert_eq!(months_elapsed(d(2024, 1, 15), d(2025, 1, 20)), 12);
    }

    #[test]
    fn hired_today_is_day_zero() {
        let today = d(2025, 6, 2);
        let snapshot = compute_balance(today, 2025, today, 0, &[]);
        assert_eq!(snapshot.vacation_accrued, 0);
        assert_eq!(snapshot.vacation_carryover, 0);
        assert_eq!(snapshot.vacation_available, 0);
    }

    #[test]
    fn future_hire_yields_zero_everything() {
        let snapshot = compute_balance(d(2026, 3, 1), 2025, d(2025, 6, 2), 0, &[]);
        assert_eq!(snapshot.vacation_accrued, 0);
        assert_eq!(snapshot.vacation_carryover, 0);
        assert_eq!(snapshot.vacation_available, 0);
        assert_eq!(snapshot.optional_holidays_available, OPTIONAL_HOLIDAY_ALLOTMENT);
    }

    #[test]
    fn full_year_tenure_caps_at_twelve() {
        // Hired Jan 1, evaluated Dec 31 of the same year: exactly 12 months,
        // no prior service year, no carryover.
        let snapshot = compute_balance(d(2025, 1, 1), 2025, d(2025, 12, 31), 0, &[]);
        assert_eq!(snapshot.vacation_accrued, 12);
        assert_eq!(snapshot.vacation_carryover, 0);
        assert_eq!(snapshot.vacation_available, 12);
    }

    #[test]
    fn long_tenure_stays_capped() {
        let snapshot = compute_balance(d(2015, 4, 20), 2025, d(2025, 8, 1), 12, &[]);
        assert_eq!(snapshot.vacation_accrued, 12);
        // Prior year fully used: nothing to carry.
        assert_eq!(snapshot.vacation_carryover, 0);
    }

    #[test]
    fn carryover_caps_at_five() {
        // Hired 2024-01-15, nothing used in 2024: 11 unused days accrue but
        // only 5 cross the year boundary.
        let snapshot = compute_balance(d(2024, 1, 15), 2025, d(2025, 1, 20), 0, &[]);
        assert_eq!(snapshot.vacation_carryover, 5);
    }

    #[test]
    fn spec_scenario_hire_2024_eval_2025() {
        let requests = vec![request(
            "vacation",
            "approved",
            d(2025, 7, 1),
            d(2025, 7, 5),
            5,
        )];
        let snapshot = compute_balance(d(2024, 1, 15), 2025, d(2025, 1, 20), 0, &requests);
        assert_eq!(snapshot.vacation_accrued, 12);
        assert_eq!(snapshot.vacation_used, 5);
        assert_eq!(snapshot.vacation_carryover, 5);
        assert_eq!(snapshot.vacation_available, 12);
    }

    #[test]
    fn cancelled_requests_do_not_count() {
        let requests = vec![
            request("vacation", "approved", d(2025, 7, 1), d(2025, 7, 5), 5),
            request("vacation", "cancelled", d(2025, 8, 4), d(2025, 8, 8), 5),
        ];
        let snapshot = compute_balance(d(2020, 1, 1), 2025, d(2025, 9, 1), 0, &requests);
        assert_eq!(snapshot.vacation_used, 5);
    }

    #[test]
    fn optional_holiday_overdraft_goes_negative() {
        let requests = vec![
            request("optional_holiday", "approved", d(2025, 3, 3), d(2025, 3, 4), 2),
            request("optional_holiday", "approved", d(2025, 6, 9), d(2025, 6, 10), 2),
        ];
        let snapshot = compute_balance(d(2020, 1, 1), 2025, d(2025, 2, 1), 0, &requests);
        assert_eq!(snapshot.optional_holidays_used, 4);
        assert_eq!(snapshot.optional_holidays_available, -1);
    }

    #[test]
    fn over_allocation_is_visible_not_clamped() {
        let requests = vec![request(
            "vacation",
            "approved",
            d(2025, 2, 3),
            d(2025, 2, 28),
            20,
        )];
        let snapshot = compute_balance(d(2024, 11, 1), 2025, d(2025, 3, 1), 0, &requests);
        assert!(snapshot.vacation_available < 0);
    }

    #[test]
    fn prior_year_usage_reduces_carryover() {
        // Hired mid-2023, used 9 days in 2024: 12 accrued - 9 used = 3 carry.
        let snapshot = compute_balance(d(2023, 6, 1), 2025, d(2025, 1, 10), 9, &[]);
        assert_eq!(snapshot.vacation_carryover, 3);
    }

    #[test]
    fn past_year_evaluation_uses_that_years_end() {
        // Evaluating 2024 from 2025 accrues through 2024-12-31 only:
        // Jul 1 to Dec 31 is 5 whole months.
        let snapshot = compute_balance(d(2024, 7, 1), 2024, d(2025, 6, 1), 0, &[]);
        assert_eq!(snapshot.vacation_accrued, 5);
    }
}
