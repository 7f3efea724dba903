use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::models::Holiday;
use crate::error::DomainError;
use crate::handlers::shared::ApiResponse;
use crate::store::HolidayRepository;

#[derive(Debug, Deserialize)]
pub struct HolidayQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// List holidays, optionally restricted to a date range
pub async fn list_holidays(
    holidays: web::Data<HolidayRepository>,
    query: web::Query<HolidayQuery>,
) -> Result<HttpResponse, DomainError> {
    let listed = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => {
            if start > end {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error("Invalid date range")));
            }
            holidays.list_range(start, end).await
        }
        _ => holidays.list_all().await,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(listed)))
}

/// Add or replace the holiday on a date
pub async fn upsert_holiday(
    holidays: web::Data<HolidayRepository>,
    input: web::Json<Holiday>,
) -> Result<HttpResponse, DomainError> {
    let holiday = holidays.upsert(input.into_inner()).await;
    Ok(HttpResponse::Created().json(ApiResponse::success(holiday)))
}

/// Remove the holiday on a date
pub async fn remove_holiday(
    holidays: web::Data<HolidayRepository>,
    path: web::Path<NaiveDate>,
) -> Result<HttpResponse, DomainError> {
    let date = path.into_inner();
    match holidays.remove(date).await {
        Some(holiday) => Ok(HttpResponse::Ok().json(ApiResponse::success(holiday))),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("No holiday on that date"))),
    }
}
