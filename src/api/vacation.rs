use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::engine::service;
use crate::error::EngineError;

#[derive(Deserialize, ToSchema)]
pub struct CreateVacation {
    /// Either `vacation` or `optional_holiday`.
    #[schema(example = "vacation")]
    pub vacation_type: String,
    #[schema(example = "2025-07-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-07-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[serde(default)]
    #[schema(example = "summer trip")]
    pub notes: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DateRange {
    #[schema(example = "2024-12-20", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
}

/* =========================
List / create / cancel
========================= */

/// Swagger doc for list_vacations endpoint
#[utoipa::path(
    get,
    path = "/vacations",
    responses(
        (status = 200, description = "All vacation requests for the caller", body = Vec<crate::model::VacationRequest>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn list_vacations(
    auth: AuthUser,
    pool: web::Data<PgPool>,
) -> actix_web::Result<impl Responder, EngineError> {
    let vacations = service::list_requests(pool.get_ref(), &auth.identity).await?;
    Ok(HttpResponse::Ok().json(vacations))
}

/// Swagger doc for create_vacation endpoint
#[utoipa::path(
    post,
    path = "/vacations",
    request_body(
        content = CreateVacation,
        description = "Vacation request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Created request plus post-creation balance", body = crate::engine::service::CreatedRequest),
        (status = 400, description = "Validation rejection (invalid_range, past_date, invalid_kind)"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn create_vacation(
    auth: AuthUser,
    pool: web::Data<PgPool>,
    payload: web::Json<CreateVacation>,
) -> actix_web::Result<impl Responder, EngineError> {
    let created = service::create_request(
        pool.get_ref(),
        &auth.identity,
        &payload.vacation_type,
        payload.start_date,
        payload.end_date,
        &payload.notes,
    )
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/// Swagger doc for delete_vacation endpoint
#[utoipa::path(
    delete,
    path = "/vacations/{id}",
    params(
        ("id" = i64, Path, description = "ID of the vacation request to cancel")
    ),
    responses(
        (status = 200, description = "Request cancelled"),
        (status = 400, description = "Request already started (past_date)"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found or not owned by caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Vacation"
)]
pub async fn delete_vacation(
    auth: AuthUser,
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder, EngineError> {
    let request_id = path.into_inner();
    service::cancel_request(pool.get_ref(), &auth.identity, request_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Vacation request cancelled"
    })))
}

/* =========================
Business-day calculation
========================= */

/// Swagger doc for calculate_days endpoint
#[utoipa::path(
    post,
    path = "/vacations/calculate-days",
    request_body(
        content = DateRange,
        description = "Inclusive date range",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Business days and holidays in range", body = crate::engine::service::BusinessDayReport),
        (status = 400, description = "Start after end (invalid_range)")
    ),
    tag = "Vacation"
)]
pub async fn calculate_days(
    pool: web::Data<PgPool>,
    payload: web::Json<DateRange>,
) -> actix_web::Result<impl Responder, EngineError> {
    let report =
        service::calculate_business_days(pool.get_ref(), payload.start_date, payload.end_date)
            .await?;
    Ok(HttpResponse::Ok().json(report))
}
