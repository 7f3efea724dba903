use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::models::{Request, RequestKind, RequestStatus};
use crate::error::DomainError;

/// Optional filters for listing requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestFilter {
    pub employee_id: Option<Uuid>,
    pub status: Option<RequestStatus>,
    pub kind: Option<RequestKind>,
}

/// In-memory request store. Stands in for the caller-owned persistence row
/// the engine reads and writes back; requests are never deleted, only
/// updated with appended approval records.
#[derive(Clone, Default)]
pub struct RequestRepository {
    requests: Arc<RwLock<HashMap<Uuid, Request>>>,
}

impl RequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a freshly submitted request
    pub async fn insert(&self, request: Request) -> Request {
        let mut requests = self.requests.write().await;
        requests.insert(request.id, request.clone());
        request
    }

    /// Get a specific request by ID
    pub async fn get(&self, id: Uuid) -> Option<Request> {
        let requests = self.requests.read().await;
        requests.get(&id).cloned()
    }

    /// Write back a transitioned request
    pub async fn update(&self, request: Request) -> Result<Request, DomainError> {
        let mut requests = self.requests.write().await;
        if !requests.contains_key(&request.id) {
            return Err(DomainError::NotFound(format!(
                "request {} does not exist",
                request.id
            )));
        }
        requests.insert(request.id, request.clone());
        Ok(request)
    }

    /// Get all requests matching the filter, newest submissions first
    pub async fn list(&self, filter: RequestFilter) -> Vec<Request> {
        let requests = self.requests.read().await;
        let mut matched: Vec<Request> = requests
            .values()
            .filter(|request| {
                filter
                    .employee_id
                    .is_none_or(|employee_id| request.employee_id == employee_id)
                    && filter.status.is_none_or(|status| request.status == status)
                    && filter.kind.is_none_or(|kind| request.kind == kind)
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        matched
    }
}
