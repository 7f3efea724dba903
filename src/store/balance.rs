use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bigdecimal::BigDecimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::models::{BalanceCheck, BalanceCommit, BalanceKey, LeaveBalance, LeaveType};
use crate::error::DomainError;

#[derive(Default)]
struct Ledger {
    balances: HashMap<BalanceKey, LeaveBalance>,
    // Idempotency guard: request ids whose debit has already been applied
    committed: HashSet<Uuid>,
}

/// In-memory balance ledger. The one shared mutable resource of the
/// engine; `commit` performs read-verify-write as a single unit under the
/// write lock so concurrent approvals cannot both debit the same row.
#[derive(Clone, Default)]
pub struct BalanceRepository {
    ledger: Arc<RwLock<Ledger>>,
}

impl BalanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the allocation for one (employee, type, year) row.
    /// Days already used stay on the row.
    pub async fn set_allocation(
        &self,
        employee_id: Uuid,
        leave_type: LeaveType,
        year: i32,
        allocated: BigDecimal,
    ) -> LeaveBalance {
        let mut ledger = self.ledger.write().await;
        let key = BalanceKey {
            employee_id,
            leave_type,
            year,
        };

        let balance = ledger
            .balances
            .entry(key)
            .and_modify(|row| row.allocated = allocated.clone())
            .or_insert_with(|| LeaveBalance::new(employee_id, leave_type, year, allocated));
        balance.clone()
    }

    /// Get all balance rows for an employee in a given year
    pub async fn get_for_employee(&self, employee_id: Uuid, year: i32) -> Vec<LeaveBalance> {
        let ledger = self.ledger.read().await;
        let mut rows: Vec<LeaveBalance> = ledger
            .balances
            .values()
            .filter(|row| row.employee_id == employee_id && row.year == year)
            .cloned()
            .collect();

        rows.sort_by_key(|row| row.leave_type.as_str());
        rows
    }

    /// Pure read-check: does the requested fractional amount fit within the
    /// remaining balance? Never mutates.
    pub async fn check_availability(
        &self,
        employee_id: Uuid,
        leave_type: LeaveType,
        year: i32,
        requested: &BigDecimal,
    ) -> Result<BalanceCheck, DomainError> {
        let ledger = self.ledger.read().await;
        let key = BalanceKey {
            employee_id,
            leave_type,
            year,
        };

        let balance = ledger.balances.get(&key).ok_or_else(|| {
            DomainError::NotFound(format!(
                "no {} balance allocated for employee {} in {}",
                leave_type, employee_id, year
            ))
        })?;

        Ok(BalanceCheck {
            ok: balance.fits(requested),
            remaining: balance.remaining(),
        })
    }

    /// Debit the ledger at final approval. Idempotent per request id: a
    /// duplicate commit is a no-op and never double-debits. Sufficiency is
    /// re-verified under the write lock; losing that race is a concurrency
    /// error and the caller retries `decide` from a fresh read.
    pub async fn commit(&self, commit: &BalanceCommit) -> Result<LeaveBalance, DomainError> {
        let mut ledger = self.ledger.write().await;

        let key = BalanceKey {
            employee_id: commit.employee_id,
            leave_type: commit.leave_type,
            year: commit.year,
        };

        if ledger.committed.contains(&commit.request_id) {
            log::warn!(
                "Duplicate balance commit for request {} ignored",
                commit.request_id
            );
            let balance = ledger.balances.get(&key).ok_or_else(|| {
                DomainError::NotFound(format!(
                    "no {} balance row for employee {} in {}",
                    commit.leave_type, commit.employee_id, commit.year
                ))
            })?;
            return Ok(balance.clone());
        }

        let balance = ledger.balances.get_mut(&key).ok_or_else(|| {
            DomainError::NotFound(format!(
                "no {} balance row for employee {} in {}",
                commit.leave_type, commit.employee_id, commit.year
            ))
        })?;

        if !balance.fits(&commit.days) {
            return Err(DomainError::Concurrency(format!(
                "balance changed since the availability check: {} days requested, {} remaining",
                commit.days,
                balance.remaining()
            )));
        }

        balance.used = &balance.used + &commit.days;
        let updated = balance.clone();
        ledger.committed.insert(commit.request_id);

        Ok(updated)
    }
}
