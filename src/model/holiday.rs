use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Corporate holiday row. `holiday_date` is unique across all years combined;
/// the unique index is what makes the lazy sync idempotent under concurrent
/// first-touch.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 7,
        "name": "Thanksgiving",
        "holiday_date": "2025-11-27",
        "year": 2025
    })
)]
pub struct CorporateHoliday {
    #[schema(example = 7)]
    pub id: i64,

    #[schema(example = "Thanksgiving")]
    pub name: String,

    #[schema(example = "2025-11-27", value_type = String, format = "date")]
    pub holiday_date: NaiveDate,

    #[schema(example = 2025)]
    pub year: i32,
}
