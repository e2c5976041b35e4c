//! Adapter-facing engine operations.
//!
//! Every interface (REST controller, MCP tool server, chat orchestrator)
//! calls these and nothing else, which is what guarantees identical answers
//! regardless of transport. Identity arrives pre-resolved by the adapter;
//! the engine never accepts a caller-supplied employee id as the
//! authorization anchor.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::auth::Identity;
use crate::engine::{accrual, business_days, calendar, validate};
use crate::error::EngineError;
use crate::model::{
    BalanceSnapshot, CorporateHoliday, Employee, RequestKind, VacationRequest,
};
use crate::store;

/// Business-day calculation result, including which holidays fell in range.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BusinessDayReport {
    #[schema(example = "2024-12-20", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2025-01-03", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    #[schema(example = 9)]
    pub business_days: u32,
    #[schema(value_type = Vec<String>)]
    pub holidays_in_range: Vec<NaiveDate>,
}

/// A freshly created request plus the post-creation balance.
///
/// Sufficiency is advisory: creation never hard-blocks on balance, so the
/// snapshot is how callers see (and may warn about) a negative availability.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedRequest {
    pub request: VacationRequest,
    pub balance: BalanceSnapshot,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Union of the synced holiday sets for every year a range touches.
async fn holiday_dates_for_range(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<HashSet<NaiveDate>, EngineError> {
    let mut dates = HashSet::new();
    for year in start.year()..=end.year() {
        for holiday in calendar::ensure_holidays(pool, year).await? {
            dates.insert(holiday.holiday_date);
        }
    }
    Ok(dates)
}

/* =========================
Profile
========================= */

pub async fn get_profile(pool: &PgPool, identity: &Identity) -> Result<Employee, EngineError> {
    Ok(store::get_or_create_employee(pool, identity).await?)
}

pub async fn update_hire_date(
    pool: &PgPool,
    identity: &Identity,
    hire_date: NaiveDate,
) -> Result<Employee, EngineError> {
    let employee = store::get_or_create_employee(pool, identity).await?;
    Ok(store::update_hire_date(pool, employee.id, hire_date).await?)
}

/* =========================
Balance
========================= */

pub async fn get_balance(
    pool: &PgPool,
    identity: &Identity,
    year: Option<i32>,
) -> Result<BalanceSnapshot, EngineError> {
    let now = today();
    let year = year.unwrap_or_else(|| now.year());

    let employee = store::get_or_create_employee(pool, identity).await?;

    // Lazy year rollover: make sure this year's and next year's calendars
    // exist before anything is derived from them.
    calendar::ensure_holidays(pool, year).await?;
    calendar::ensure_holidays(pool, year + 1).await?;

    let requests = store::requests_for_year(pool, employee.id, year).await?;
    let prior_used = store::used_business_days(
        pool,
        employee.id,
        year - 1,
        &RequestKind::Vacation.to_string(),
    )
    .await?;

    Ok(accrual::compute_balance(
        employee.hire_date,
        year,
        now,
        prior_used,
        &requests,
    ))
}

/* =========================
Holidays and counting
========================= */

pub async fn get_holidays(
    pool: &PgPool,
    year: Option<i32>,
) -> Result<Vec<CorporateHoliday>, EngineError> {
    let year = year.unwrap_or_else(|| today().year());
    calendar::ensure_holidays(pool, year).await
}

pub async fn calculate_business_days(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BusinessDayReport, EngineError> {
    if start > end {
        return Err(EngineError::InvalidRange(
            "start date must not be after end date".to_string(),
        ));
    }

    let holidays = holiday_dates_for_range(pool, start, end).await?;
    let business_days = business_days::count_business_days(start, end, &holidays)?;

    let mut holidays_in_range: Vec<NaiveDate> = holidays
        .into_iter()
        .filter(|d| *d >= start && *d <= end)
        .collect();
    holidays_in_range.sort();

    Ok(BusinessDayReport {
        start_date: start,
        end_date: end,
        business_days,
        holidays_in_range,
    })
}

/* =========================
Requests
========================= */

pub async fn list_requests(
    pool: &PgPool,
    identity: &Identity,
) -> Result<Vec<VacationRequest>, EngineError> {
    let employee = store::get_or_create_employee(pool, identity).await?;
    Ok(store::requests_for_employee(pool, employee.id).await?)
}

pub async fn create_request(
    pool: &PgPool,
    identity: &Identity,
    kind: &str,
    start: NaiveDate,
    end: NaiveDate,
    notes: &str,
) -> Result<CreatedRequest, EngineError> {
    let now = today();
    let employee = store::get_or_create_employee(pool, identity).await?;

    let kind = validate::validate_request(kind, start, end, now)?;

    let holidays = holiday_dates_for_range(pool, start, end).await?;
    let business_days = business_days::count_business_days(start, end, &holidays)?;
    if business_days == 0 {
        return Err(EngineError::InvalidRange(
            "no business days in selected date range".to_string(),
        ));
    }

    let request = store::insert_request(
        pool,
        employee.id,
        &kind.to_string(),
        start,
        end,
        business_days as i32,
        notes,
    )
    .await?;

    let balance = get_balance(pool, identity, Some(start.year())).await?;
    match kind {
        RequestKind::Vacation if balance.vacation_available < 0 => {
            tracing::warn!(
                employee_id = employee.id,
                available = balance.vacation_available,
                "Vacation request over-allocates the yearly pool"
            );
        }
        RequestKind::OptionalHoliday if balance.optional_holidays_available < 0 => {
            tracing::warn!(
                employee_id = employee.id,
                available = balance.optional_holidays_available,
                "Optional holiday request exceeds the yearly allotment"
            );
        }
        _ => {}
    }

    Ok(CreatedRequest { request, balance })
}

pub async fn cancel_request(
    pool: &PgPool,
    identity: &Identity,
    request_id: i64,
) -> Result<(), EngineError> {
    let employee = store::get_or_create_employee(pool, identity).await?;

    let request = store::request_by_id(pool, request_id, employee.id)
        .await?
        .ok_or_else(|| EngineError::NotFound("vacation request not found".to_string()))?;

    validate::validate_cancellation(request.start_date, today())?;

    let cancelled = store::cancel_request(pool, request_id).await?;
    if cancelled == 0 {
        // Lost a race or it was already cancelled; either way nothing to do.
        return Err(EngineError::NotFound(
            "vacation request not found or already cancelled".to_string(),
        ));
    }

    Ok(())
}
