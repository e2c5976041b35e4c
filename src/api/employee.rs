use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::{IntoParams, ToSchema};

use crate::auth::AuthUser;
use crate::engine::service;
use crate::error::EngineError;

#[derive(Deserialize, ToSchema)]
pub struct UpdateProfile {
    /// New hire date; omit to leave the profile unchanged.
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub hire_date: Option<NaiveDate>,
}

#[derive(Deserialize, IntoParams)]
pub struct BalanceQuery {
    /// Year to evaluate; defaults to the current year.
    #[param(example = 2025)]
    pub year: Option<i32>,
}

/* =========================
Profile
========================= */

/// Swagger doc for get_my_profile endpoint
#[utoipa::path(
    get,
    path = "/employees/me",
    responses(
        (status = 200, description = "Current user's employee profile", body = crate::model::Employee),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_my_profile(
    auth: AuthUser,
    pool: web::Data<PgPool>,
) -> actix_web::Result<impl Responder, EngineError> {
    let employee = service::get_profile(pool.get_ref(), &auth.identity).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Swagger doc for update_my_profile endpoint
#[utoipa::path(
    put,
    path = "/employees/me",
    request_body(
        content = UpdateProfile,
        description = "Profile fields to update",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Updated employee profile", body = crate::model::Employee),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_my_profile(
    auth: AuthUser,
    pool: web::Data<PgPool>,
    payload: web::Json<UpdateProfile>,
) -> actix_web::Result<impl Responder, EngineError> {
    let employee = match payload.hire_date {
        Some(hire_date) => {
            service::update_hire_date(pool.get_ref(), &auth.identity, hire_date).await?
        }
        None => service::get_profile(pool.get_ref(), &auth.identity).await?,
    };

    Ok(HttpResponse::Ok().json(employee))
}

/* =========================
Balance
========================= */

/// Swagger doc for get_my_balance endpoint
#[utoipa::path(
    get,
    path = "/employees/me/balance",
    params(BalanceQuery),
    responses(
        (status = 200, description = "Derived vacation balance", body = crate::model::BalanceSnapshot),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_my_balance(
    auth: AuthUser,
    pool: web::Data<PgPool>,
    query: web::Query<BalanceQuery>,
) -> actix_web::Result<impl Responder, EngineError> {
    let balance = service::get_balance(pool.get_ref(), &auth.identity, query.year).await?;
    Ok(HttpResponse::Ok().json(balance))
}
