use chrono::Utc;
use uuid::Uuid;

use super::models::{
    ActorRole, ApprovalDecision, ApprovalRecord, ApprovalStep, BalanceCommit, Request,
    RequestStatus,
};
use crate::error::DomainError;

/// Whoever is deciding the current step. Role authorization happens here,
/// not in the transport layer.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub role: ActorRole,
}

/// Outcome of one successful transition: the next request value plus an
/// optional ledger-debit instruction. Executing the debit (and emitting the
/// notification) is the orchestrator's job; this module stays pure.
#[derive(Debug, Clone)]
pub struct Transition {
    pub request: Request,
    pub balance_commit: Option<BalanceCommit>,
}

/// Comment recorded when a decliner supplies none. Preserved verbatim from
/// the upstream behavior rather than rejecting the decline.
pub const DEFAULT_DECLINE_COMMENT: &str = "Request declined";

/// Apply one decision to one request.
///
/// - `pending` + manager approval -> `manager-approved`, step moves to HR
/// - `pending` + manager decline -> `declined` (terminal), HR skipped
/// - `manager-approved` + HR approval -> `approved` (terminal), leave
///   requests carry a `BalanceCommit`
/// - `manager-approved` + HR decline -> `declined` (terminal), no commit
///
/// Any attempt from a terminal state, or by an actor whose role does not
/// match the current step, fails with an authorization error and leaves the
/// input untouched.
pub fn apply_decision(
    request: &Request,
    actor: &Actor,
    decision: ApprovalDecision,
    comments: Option<String>,
) -> Result<Transition, DomainError> {
    if request.status.is_terminal() {
        return Err(DomainError::Authorization(format!(
            "request {} is already {}",
            request.id, request.status
        )));
    }

    let required_role = match request.current_step {
        ApprovalStep::Manager => ActorRole::Manager,
        ApprovalStep::Hr => ActorRole::Hr,
        ApprovalStep::None => {
            return Err(DomainError::Authorization(format!(
                "request {} is not awaiting a decision",
                request.id
            )));
        }
    };

    if actor.role != required_role {
        return Err(DomainError::Authorization(format!(
            "step requires the {} role, actor has {}",
            required_role, actor.role
        )));
    }

    let record = ApprovalRecord {
        approver_id: actor.id,
        approver_name: actor.name.clone(),
        approver_role: actor.role,
        decision,
        decided_at: Utc::now(),
        comments: normalize_comments(decision, comments),
    };

    let mut next = request.clone();
    let mut balance_commit = None;

    match (request.current_step, decision) {
        (ApprovalStep::Manager, ApprovalDecision::Approved) => {
            next.status = RequestStatus::ManagerApproved;
            next.current_step = ApprovalStep::Hr;
            next.manager_approval = Some(record);
        }
        (ApprovalStep::Manager, ApprovalDecision::Declined) => {
            next.status = RequestStatus::Declined;
            next.current_step = ApprovalStep::None;
            next.manager_approval = Some(record);
        }
        (ApprovalStep::Hr, ApprovalDecision::Approved) => {
            next.status = RequestStatus::Approved;
            next.current_step = ApprovalStep::None;
            next.hr_approval = Some(record);
            balance_commit = next.leave_type.map(|leave_type| BalanceCommit {
                request_id: next.id,
                employee_id: next.employee_id,
                leave_type,
                year: next.balance_year(),
                days: next.calculated_days.clone(),
            });
        }
        (ApprovalStep::Hr, ApprovalDecision::Declined) => {
            next.status = RequestStatus::Declined;
            next.current_step = ApprovalStep::None;
            next.hr_approval = Some(record);
        }
        (ApprovalStep::None, _) => unreachable!("handled above"),
    }

    Ok(Transition {
        request: next,
        balance_commit,
    })
}

/// Declines must carry a comment; a missing or blank one becomes the
/// literal placeholder. Approval comments pass through as given.
fn normalize_comments(decision: ApprovalDecision, comments: Option<String>) -> Option<String> {
    match decision {
        ApprovalDecision::Approved => comments.filter(|c| !c.trim().is_empty()),
        ApprovalDecision::Declined => match comments {
            Some(c) if !c.trim().is_empty() => Some(c),
            _ => Some(DEFAULT_DECLINE_COMMENT.to_string()),
        },
    }
}
