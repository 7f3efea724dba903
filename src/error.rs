use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::handlers::shared::ApiResponse;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient balance: {requested} days requested, {remaining} remaining")]
    InsufficientBalance {
        requested: BigDecimal,
        remaining: BigDecimal,
    },

    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Concurrent update: {0}")]
    Concurrency(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::InsufficientBalance { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Authorization(_) => StatusCode::FORBIDDEN,
            DomainError::Concurrency(_) => StatusCode::CONFLICT,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        log::error!(
            "Request failed with status {}: {}",
            status_code,
            error_message
        );

        // Insufficient balance carries the shortfall so the UI can show it
        if let DomainError::InsufficientBalance {
            requested,
            remaining,
        } = self
        {
            let shortfall = serde_json::json!({
                "requested": requested,
                "remaining": remaining,
            });
            return HttpResponse::build(status_code)
                .json(ApiResponse::error_with_data(shortfall, &error_message));
        }

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(&error_message))
    }
}
