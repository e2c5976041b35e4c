use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestKind {
    Vacation,
    OptionalHoliday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    Approved,
    Cancelled,
}

/// A single vacation or optional-holiday request.
///
/// `business_days` is computed once at creation time and stored; it is never
/// recomputed against later calendar changes. Cancellation is a status
/// transition, and cancelled rows are excluded from every usage sum.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 42,
        "employee_id": 1,
        "vacation_type": "vacation",
        "start_date": "2025-07-01",
        "end_date": "2025-07-05",
        "business_days": 5,
        "notes": "summer trip",
        "status": "approved",
        "created_at": "2025-01-20T09:30:00Z"
    })
)]
pub struct VacationRequest {
    #[schema(example = 42)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "vacation", value_type = String)]
    pub vacation_type: String,

    #[schema(example = "2025-07-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2025-07-05", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    /// Weekdays in the inclusive range, minus corporate holidays, at creation time.
    #[schema(example = 5)]
    pub business_days: i32,

    #[schema(example = "summer trip")]
    pub notes: String,

    #[schema(example = "approved", value_type = String)]
    pub status: String,

    #[schema(example = "2025-01-20T09:30:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

impl VacationRequest {
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved.to_string()
    }

    pub fn is_kind(&self, kind: RequestKind) -> bool {
        self.vacation_type == kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_round_trips_snake_case() {
        assert_eq!(RequestKind::OptionalHoliday.to_string(), "optional_holiday");
        assert_eq!(RequestKind::from_str("vacation").unwrap(), RequestKind::Vacation);
        assert!(RequestKind::from_str("sabbatical").is_err());
    }

    #[test]
    fn status_round_trips_snake_case() {
        assert_eq!(RequestStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(RequestStatus::from_str("approved").unwrap(), RequestStatus::Approved);
    }
}
