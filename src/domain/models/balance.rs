use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::request::LeaveType;

/// One ledger row: how much leave of one type an employee holds in one
/// calendar year. `remaining` is always derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    pub employee_id: Uuid,
    pub leave_type: LeaveType,
    pub year: i32,
    pub allocated: BigDecimal,
    pub used: BigDecimal,
}

impl LeaveBalance {
    pub fn new(employee_id: Uuid, leave_type: LeaveType, year: i32, allocated: BigDecimal) -> Self {
        LeaveBalance {
            employee_id,
            leave_type,
            year,
            allocated,
            used: BigDecimal::from(0),
        }
    }

    pub fn remaining(&self) -> BigDecimal {
        &self.allocated - &self.used
    }

    /// Pure read-check: does `requested` fit within what is left?
    pub fn fits(&self, requested: &BigDecimal) -> bool {
        requested <= &self.remaining()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BalanceKey {
    pub employee_id: Uuid,
    pub leave_type: LeaveType,
    pub year: i32,
}

/// Result of an availability check, surfaced to the submitter so the UI
/// can display the shortfall.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCheck {
    pub ok: bool,
    pub remaining: BigDecimal,
}

/// Instruction to debit the ledger, produced by the state machine at final
/// approval and executed exactly once per request id.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceCommit {
    pub request_id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: LeaveType,
    pub year: i32,
    pub days: BigDecimal,
}
