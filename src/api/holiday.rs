use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::IntoParams;

use crate::engine::service;
use crate::error::EngineError;

#[derive(Deserialize, IntoParams)]
pub struct HolidayQuery {
    /// Year to resolve; defaults to the current year.
    #[param(example = 2025)]
    pub year: Option<i32>,
}

/// Swagger doc for get_holidays endpoint
#[utoipa::path(
    get,
    path = "/holidays",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Corporate holidays for the year, ordered by date", body = Vec<crate::model::CorporateHoliday>)
    ),
    tag = "Holiday"
)]
pub async fn get_holidays(
    pool: web::Data<PgPool>,
    query: web::Query<HolidayQuery>,
) -> actix_web::Result<impl Responder, EngineError> {
    let holidays = service::get_holidays(pool.get_ref(), query.year).await?;
    Ok(HttpResponse::Ok().json(holidays))
}
