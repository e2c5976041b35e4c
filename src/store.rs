//! Vacation Ledger: all SQL against the durable store lives here.
//!
//! The engine reads/writes through these narrow functions only. Queries use
//! the runtime-checked `query_as`/`query_scalar` forms so the crate compiles
//! without a live database.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::auth::Identity;
use crate::model::{CorporateHoliday, Employee, VacationRequest};

/* =========================
Employees
========================= */

/// Fetch the employee for a resolved identity, creating the row on first
/// authenticated access. The upsert keys on the unique OIDC subject, so a
/// concurrent first-touch for the same person converges on one row.
pub async fn get_or_create_employee(
    pool: &PgPool,
    identity: &Identity,
) -> Result<Employee, sqlx::Error> {
    let existing = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employees WHERE oidc_user_id = $1",
    )
    .bind(&identity.subject)
    .fetch_optional(pool)
    .await?;

    if let Some(employee) = existing {
        return Ok(employee);
    }

    sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO employees (oidc_user_id, email, first_name, last_name)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (oidc_user_id) DO UPDATE SET email = EXCLUDED.email
        RETURNING *
        "#,
    )
    .bind(&identity.subject)
    .bind(&identity.email)
    .bind(&identity.first_name)
    .bind(&identity.last_name)
    .fetch_one(pool)
    .await
}

pub async fn update_hire_date(
    pool: &PgPool,
    employee_id: i64,
    hire_date: NaiveDate,
) -> Result<Employee, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        "UPDATE employees SET hire_date = $1 WHERE id = $2 RETURNING *",
    )
    .bind(hire_date)
    .bind(employee_id)
    .fetch_one(pool)
    .await
}

/* =========================
Vacation requests
========================= */

pub async fn requests_for_employee(
    pool: &PgPool,
    employee_id: i64,
) -> Result<Vec<VacationRequest>, sqlx::Error> {
    sqlx::query_as::<_, VacationRequest>(
        r#"
        SELECT * FROM vacation_requests
        WHERE employee_id = $1
        ORDER BY start_date DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await
}

/// All requests starting within a calendar year, cancelled rows included;
/// the accrual calculator filters by kind and status itself.
pub async fn requests_for_year(
    pool: &PgPool,
    employee_id: i64,
    year: i32,
) -> Result<Vec<VacationRequest>, sqlx::Error> {
    sqlx::query_as::<_, VacationRequest>(
        r#"
        SELECT * FROM vacation_requests
        WHERE employee_id = $1 AND start_date >= $2 AND start_date <= $3
        ORDER BY start_date
        "#,
    )
    .bind(employee_id)
    .bind(year_start(year))
    .bind(year_end(year))
    .fetch_all(pool)
    .await
}

/// Business days consumed by non-cancelled requests of one kind starting in
/// the given year.
pub async fn used_business_days(
    pool: &PgPool,
    employee_id: i64,
    year: i32,
    vacation_type: &str,
) -> Result<i32, sqlx::Error> {
    let total = sqlx::query_scalar::<_, Option<i64>>(
        r#"
        SELECT SUM(business_days) FROM vacation_requests
        WHERE employee_id = $1
          AND vacation_type = $2
          AND status = 'approved'
          AND start_date >= $3 AND start_date <= $4
        "#,
    )
    .bind(employee_id)
    .bind(vacation_type)
    .bind(year_start(year))
    .bind(year_end(year))
    .fetch_one(pool)
    .await?;

    Ok(total.unwrap_or(0) as i32)
}

pub async fn insert_request(
    pool: &PgPool,
    employee_id: i64,
    vacation_type: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    business_days: i32,
    notes: &str,
) -> Result<VacationRequest, sqlx::Error> {
    sqlx::query_as::<_, VacationRequest>(
        r#"
        INSERT INTO vacation_requests
            (employee_id, vacation_type, start_date, end_date, business_days, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(employee_id)
    .bind(vacation_type)
    .bind(start_date)
    .bind(end_date)
    .bind(business_days)
    .bind(notes)
    .fetch_one(pool)
    .await
}

/// Scoped to the owning employee; a foreign id resolves to None, not to
/// somebody else's row.
pub async fn request_by_id(
    pool: &PgPool,
    request_id: i64,
    employee_id: i64,
) -> Result<Option<VacationRequest>, sqlx::Error> {
    sqlx::query_as::<_, VacationRequest>(
        "SELECT * FROM vacation_requests WHERE id = $1 AND employee_id = $2",
    )
    .bind(request_id)
    .bind(employee_id)
    .fetch_optional(pool)
    .await
}

/// Cancellation is a status transition, not physical removal. Returns the
/// number of rows moved out of 'approved'.
pub async fn cancel_request(pool: &PgPool, request_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE vacation_requests SET status = 'cancelled' WHERE id = $1 AND status = 'approved'",
    )
    .bind(request_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/* =========================
Corporate holidays
========================= */

/// Idempotent by the unique date index: re-running the sync for a populated
/// year neither duplicates nor alters existing rows.
pub async fn upsert_holiday(
    pool: &PgPool,
    name: &str,
    holiday_date: NaiveDate,
    year: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO corporate_holidays (name, holiday_date, year)
        VALUES ($1, $2, $3)
        ON CONFLICT (holiday_date) DO NOTHING
        "#,
    )
    .bind(name)
    .bind(holiday_date)
    .bind(year)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn holidays_for_year(
    pool: &PgPool,
    year: i32,
) -> Result<Vec<CorporateHoliday>, sqlx::Error> {
    sqlx::query_as::<_, CorporateHoliday>(
        "SELECT * FROM corporate_holidays WHERE year = $1 ORDER BY holiday_date",
    )
    .bind(year)
    .fetch_all(pool)
    .await
}

fn year_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
}

fn year_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap()
}
