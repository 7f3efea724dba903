use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::models::{
    ActorRole, ApprovalDecision, DurationGranularity, RequestInput, RequestKind, RequestStatus,
};
use crate::domain::state_machine::Actor;
use crate::error::DomainError;
use crate::handlers::shared::ApiResponse;
use crate::services::RequestService;
use crate::store::RequestFilter;

#[derive(Debug, Deserialize)]
pub struct RequestQuery {
    pub employee_id: Option<Uuid>,
    pub status: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionInput {
    pub approver_id: Uuid,
    pub approver_name: String,
    pub role: ActorRole,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub granularity: String,
}

impl DecisionInput {
    fn into_actor(self) -> (Actor, Option<String>) {
        (
            Actor {
                id: self.approver_id,
                name: self.approver_name,
                role: self.role,
            },
            self.comments,
        )
    }
}

/// Submit a new leave or remote-work request
pub async fn create_request(
    service: web::Data<RequestService>,
    input: web::Json<RequestInput>,
) -> Result<HttpResponse, DomainError> {
    let request = service.submit(input.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(request)))
}

/// Get requests with optional filtering
pub async fn get_requests(
    service: web::Data<RequestService>,
    query: web::Query<RequestQuery>,
) -> Result<HttpResponse, DomainError> {
    // Convert status/kind strings to enums if provided
    let status = match &query.status {
        Some(status_str) => match status_str.parse::<RequestStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                return Ok(
                    HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid status"))
                )
            }
        },
        None => None,
    };

    let kind = match &query.kind {
        Some(kind_str) => match kind_str.parse::<RequestKind>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                return Ok(
                    HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid kind"))
                )
            }
        },
        None => None,
    };

    let requests = service
        .list(RequestFilter {
            employee_id: query.employee_id,
            status,
            kind,
        })
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(requests)))
}

/// Get a specific request by ID
pub async fn get_request(
    service: web::Data<RequestService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let request = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(request)))
}

/// Approve the current step of a request
pub async fn approve_request(
    service: web::Data<RequestService>,
    path: web::Path<Uuid>,
    input: web::Json<DecisionInput>,
) -> Result<HttpResponse, DomainError> {
    let (actor, comments) = input.into_inner().into_actor();
    let (request, event) = service
        .decide(path.into_inner(), actor, ApprovalDecision::Approved, comments)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "request": request,
        "event": event,
    }))))
}

/// Decline the current step of a request
pub async fn decline_request(
    service: web::Data<RequestService>,
    path: web::Path<Uuid>,
    input: web::Json<DecisionInput>,
) -> Result<HttpResponse, DomainError> {
    let (actor, comments) = input.into_inner().into_actor();
    let (request, event) = service
        .decide(path.into_inner(), actor, ApprovalDecision::Declined, comments)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "request": request,
        "event": event,
    }))))
}

/// Re-send the notification for an already-decided request
pub async fn republish_request(
    service: web::Data<RequestService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let event = service.republish(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(event),
        "Notification republished",
    )))
}

/// Duration preview for the submission form
pub async fn preview_days(
    service: web::Data<RequestService>,
    query: web::Query<PreviewQuery>,
) -> Result<HttpResponse, DomainError> {
    let granularity = match query.granularity.parse::<DurationGranularity>() {
        Ok(granularity) => granularity,
        Err(_) => {
            return Ok(
                HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid granularity"))
            )
        }
    };

    let calculated_days = service
        .calculate_days(query.start_date, query.end_date, granularity)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "startDate": query.start_date,
        "endDate": query.end_date,
        "granularity": granularity,
        "calculatedDays": calculated_days,
    }))))
}
