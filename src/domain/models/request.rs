use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;
use crate::error::DomainError;

/// A leave or remote-work request moving through the two-step approval
/// lifecycle. Mutated only by the transition function in
/// `domain::state_machine`; approval records are appended, never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub kind: RequestKind,
    pub leave_type: Option<LeaveType>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub granularity: DurationGranularity,
    pub reason: String,
    pub calculated_days: BigDecimal,
    pub status: RequestStatus,
    pub current_step: ApprovalStep,
    pub manager_approval: Option<ApprovalRecord>,
    pub hr_approval: Option<ApprovalRecord>,
    pub submitted_at: DateTime<Utc>,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInput {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub kind: RequestKind,
    pub leave_type: Option<LeaveType>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub granularity: DurationGranularity,
    pub reason: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// One decision by one actor at one step. Written exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRecord {
    pub approver_id: Uuid,
    pub approver_name: String,
    pub approver_role: ActorRole,
    pub decision: ApprovalDecision,
    pub decided_at: DateTime<Utc>,
    pub comments: Option<String>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RequestKind {
        Leave => "leave",
        Remote => "remote",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum LeaveType {
        Vacation => "vacation",
        Sick => "sick",
        Personal => "personal",
        Maternity => "maternity",
        Paternity => "paternity",
        Bereavement => "bereavement",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DurationGranularity {
        FullDay => "full-day",
        HalfDayMorning => "half-day-morning",
        HalfDayAfternoon => "half-day-afternoon",
        QuarterDayOne => "quarter-day-1",
        QuarterDayTwo => "quarter-day-2",
        QuarterDayThree => "quarter-day-3",
        QuarterDayFour => "quarter-day-4",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RequestStatus {
        Pending => "pending",
        ManagerApproved => "manager-approved",
        Approved => "approved",
        Declined => "declined",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ApprovalStep {
        Manager => "manager",
        Hr => "hr",
        None => "none",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ApprovalDecision {
        Approved => "approved",
        Declined => "declined",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ActorRole {
        Manager => "manager",
        Hr => "hr",
    }
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Declined)
    }
}

impl RequestInput {
    /// Field-level validation; duration and balance checks happen in the
    /// orchestrator once the chargeable days are known.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.start_date > self.end_date {
            return Err(DomainError::Validation(
                "start date must not be after end date".to_string(),
            ));
        }

        if self.reason.trim().is_empty() {
            return Err(DomainError::Validation("reason must not be empty".to_string()));
        }

        match self.kind {
            RequestKind::Leave => {
                if self.leave_type.is_none() {
                    return Err(DomainError::Validation(
                        "leave requests require a leave type".to_string(),
                    ));
                }
            }
            RequestKind::Remote => {
                if self.leave_type.is_some() {
                    return Err(DomainError::Validation(
                        "remote-work requests do not take a leave type".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Request {
    /// Construct a freshly submitted request in the initial state:
    /// `pending`, awaiting the manager step.
    pub fn from_input(input: RequestInput, calculated_days: BigDecimal) -> Self {
        Request {
            id: Uuid::new_v4(),
            employee_id: input.employee_id,
            employee_name: input.employee_name,
            kind: input.kind,
            leave_type: input.leave_type,
            start_date: input.start_date,
            end_date: input.end_date,
            granularity: input.granularity,
            reason: input.reason,
            calculated_days,
            status: RequestStatus::Pending,
            current_step: ApprovalStep::Manager,
            manager_approval: None,
            hr_approval: None,
            submitted_at: Utc::now(),
            attachments: input.attachments,
        }
    }

    /// Year a leave request is charged against: the year the leave starts.
    pub fn balance_year(&self) -> i32 {
        use chrono::Datelike;
        self.start_date.year()
    }
}
