use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Derived, uncached view of an employee's vacation account for one year.
///
/// There is no stored balance anywhere: every snapshot is recomputed from the
/// hire date, the evaluation date and the non-cancelled request rows.
/// Available counts may go negative when over-allocated; callers decide
/// whether to warn or block, the engine never clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "vacation_accrued": 12,
        "vacation_used": 5,
        "vacation_available": 12,
        "vacation_carryover": 5,
        "optional_holidays_used": 1,
        "optional_holidays_available": 2
    })
)]
pub struct BalanceSnapshot {
    #[schema(example = 12)]
    pub vacation_accrued: i32,
    #[schema(example = 5)]
    pub vacation_used: i32,
    #[schema(example = 12)]
    pub vacation_available: i32,
    #[schema(example = 5)]
    pub vacation_carryover: i32,
    #[schema(example = 1)]
    pub optional_holidays_used: i32,
    #[schema(example = 2)]
    pub optional_holidays_available: i32,
}
