use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::models::LeaveType;
use crate::error::DomainError;
use crate::handlers::shared::ApiResponse;
use crate::store::BalanceRepository;

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationInput {
    pub leave_type: LeaveType,
    pub year: i32,
    pub allocated: BigDecimal,
}

/// Get an employee's balance rows for a year (defaults to the current year)
pub async fn get_employee_balances(
    balances: web::Data<BalanceRepository>,
    path: web::Path<Uuid>,
    query: web::Query<BalanceQuery>,
) -> Result<HttpResponse, DomainError> {
    let employee_id = path.into_inner();
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let rows = balances.get_for_employee(employee_id, year).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rows)))
}

/// Create or replace one (employee, type, year) allocation
pub async fn set_allocation(
    balances: web::Data<BalanceRepository>,
    path: web::Path<Uuid>,
    input: web::Json<AllocationInput>,
) -> Result<HttpResponse, DomainError> {
    let employee_id = path.into_inner();
    let input = input.into_inner();

    if input.allocated < BigDecimal::from(0) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("Allocation must not be negative")));
    }

    let balance = balances
        .set_allocation(employee_id, input.leave_type, input.year, input.allocated)
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(balance)))
}
