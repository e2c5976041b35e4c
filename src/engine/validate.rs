//! Request Validator: temporal and range invariants gating writes to
//! vacation data. Rules run in order; the first failure wins.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::model::RequestKind;

/// Validate a proposed request before it is persisted, returning the parsed
/// kind on success.
///
/// Order matters: range, then past-date, then kind. Balance sufficiency is
/// deliberately not checked here; it is advisory and surfaced by the caller.
pub fn validate_request(
    kind: &str,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<RequestKind, EngineError> {
    if start > end {
        return Err(EngineError::InvalidRange(
            "start date must not be after end date".to_string(),
        ));
    }

    if end < today {
        return Err(EngineError::PastDate(
            "cannot schedule a request entirely in the past".to_string(),
        ));
    }

    RequestKind::from_str(kind).map_err(|_| {
        EngineError::InvalidKind(format!(
            "unknown request type '{kind}', expected 'vacation' or 'optional_holiday'"
        ))
    })
}

/// A request whose start date is already in the past is historical fact and
/// cannot be cancelled.
pub fn validate_cancellation(start_date: NaiveDate, today: NaiveDate) -> Result<(), EngineError> {
    if start_date < today {
        return Err(EngineError::PastDate(
            "cannot cancel a request that has already started".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    const TODAY: (i32, u32, u32) = (2025, 6, 2);

    fn today() -> NaiveDate {
        d(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn inverted_range_rejected_first() {
        // Even with a bogus kind and past dates, the range check wins.
        let err = validate_request("sabbatical", d(2024, 1, 10), d(2024, 1, 5), today());
        assert!(matches!(err, Err(EngineError::InvalidRange(_))));
    }

    #[test]
    fn fully_past_range_rejected() {
        let err = validate_request("vacation", d(2025, 5, 1), d(2025, 5, 5), today());
        assert!(matches!(err, Err(EngineError::PastDate(_))));
    }

    #[test]
    fn range_ending_today_is_allowed() {
        let kind = validate_request("vacation", d(2025, 5, 30), today(), today()).unwrap();
        assert_eq!(kind, RequestKind::Vacation);
    }

    #[test]
    fn unknown_kind_rejected_last() {
        let err = validate_request("sabbatical", d(2025, 7, 1), d(2025, 7, 5), today());
        assert!(matches!(err, Err(EngineError::InvalidKind(_))));
    }

    #[test]
    fn optional_holiday_is_a_valid_kind() {
        let kind = validate_request("optional_holiday", d(2025, 7, 1), d(2025, 7, 1), today()).unwrap();
        assert_eq!(kind, RequestKind::OptionalHoliday);
    }

    #[test]
    fn cancelling_started_request_rejected() {
        let err = validate_cancellation(d(2025, 6, 1), today());
        assert!(matches!(err, Err(EngineError::PastDate(_))));
    }

    #[test]
    fn cancelling_request_starting_today_is_allowed() {
        assert!(validate_cancellation(today(), today()).is_ok());
    }
}
