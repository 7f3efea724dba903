use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::request::{Request, RequestKind, RequestStatus};

/// Domain event emitted after each successful transition (and on
/// submission), handed to the external notifier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    pub request_id: Uuid,
    pub employee_id: Uuid,
    pub kind: RequestKind,
    pub status: RequestStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub comments: Option<String>,
}

impl RequestEvent {
    /// Snapshot the notifiable facts of a request in its current state.
    pub fn from_request(request: &Request) -> Self {
        let comments = request
            .hr_approval
            .as_ref()
            .or(request.manager_approval.as_ref())
            .and_then(|record| record.comments.clone());

        RequestEvent {
            request_id: request.id,
            employee_id: request.employee_id,
            kind: request.kind,
            status: request.status,
            start_date: request.start_date,
            end_date: request.end_date,
            comments,
        }
    }
}

/// What the external dispatcher accepts. Delivery is fire-and-forget;
/// failures never roll back a transition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    pub recipient_email: String,
    pub kind: RequestKind,
    pub request_id: Uuid,
    pub status: RequestStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub comments: Option<String>,
}

impl NotificationMessage {
    pub fn for_recipient(event: &RequestEvent, recipient_email: String) -> Self {
        NotificationMessage {
            recipient_email,
            kind: event.kind,
            request_id: event.request_id,
            status: event.status,
            start_date: event.start_date,
            end_date: event.end_date,
            comments: event.comments.clone(),
        }
    }
}
