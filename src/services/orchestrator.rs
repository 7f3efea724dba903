use std::collections::BTreeSet;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::domain::duration;
use crate::domain::models::{
    ApprovalDecision, DurationGranularity, NotificationMessage, Request, RequestEvent,
    RequestInput, RequestKind, RequestStatus,
};
use crate::domain::state_machine::{self, Actor};
use crate::error::DomainError;
use crate::services::Notifier;
use crate::store::{
    BalanceRepository, DirectoryRepository, HolidayRepository, RequestFilter, RequestRepository,
};

/// Composes the calendar, duration calculator, balance ledger and approval
/// state machine. All side effects of the lifecycle (persisting requests,
/// debiting the ledger, dispatching notifications) happen here; the domain
/// modules underneath stay pure.
#[derive(Clone)]
pub struct RequestService {
    requests: RequestRepository,
    balances: BalanceRepository,
    holidays: HolidayRepository,
    directory: DirectoryRepository,
    notifier: Arc<dyn Notifier>,
}

impl RequestService {
    pub fn new(
        requests: RequestRepository,
        balances: BalanceRepository,
        holidays: HolidayRepository,
        directory: DirectoryRepository,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            requests,
            balances,
            holidays,
            directory,
            notifier,
        }
    }

    /// Holiday dates for a range, fetched fresh per calculation. No caching;
    /// a stale set would silently change what a day costs.
    async fn holiday_set(&self, start: NaiveDate, end: NaiveDate) -> BTreeSet<NaiveDate> {
        self.holidays
            .list_range(start, end)
            .await
            .into_iter()
            .map(|holiday| holiday.date)
            .collect()
    }

    /// Standalone duration calculation, exposed for live UI preview before
    /// submission.
    pub async fn calculate_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: DurationGranularity,
    ) -> Result<BigDecimal, DomainError> {
        if start > end {
            return Err(DomainError::Validation(
                "start date must not be after end date".to_string(),
            ));
        }
        let holidays = self.holiday_set(start, end).await;
        Ok(duration::calculate(start, end, granularity, &holidays))
    }

    /// Validate and persist a new submission.
    ///
    /// Rejects reversed ranges, blank reasons, ranges with zero chargeable
    /// days, and leave requests that do not fit the remaining balance (the
    /// error carries requested and remaining for the UI).
    pub async fn submit(&self, input: RequestInput) -> Result<Request, DomainError> {
        input.validate()?;

        let holidays = self.holiday_set(input.start_date, input.end_date).await;
        let calculated_days =
            duration::calculate(input.start_date, input.end_date, input.granularity, &holidays);

        if calculated_days == BigDecimal::from(0) {
            return Err(DomainError::Validation(
                "requested range contains no chargeable days".to_string(),
            ));
        }

        if input.kind == RequestKind::Leave {
            // validate() guarantees the leave type is present
            let leave_type = input.leave_type.ok_or_else(|| {
                DomainError::Validation("leave requests require a leave type".to_string())
            })?;
            let check = self
                .balances
                .check_availability(
                    input.employee_id,
                    leave_type,
                    input.start_date.year(),
                    &calculated_days,
                )
                .await?;

            if !check.ok {
                return Err(DomainError::InsufficientBalance {
                    requested: calculated_days,
                    remaining: check.remaining,
                });
            }
        }

        let request = Request::from_input(input, calculated_days);
        let request = self.requests.insert(request).await;
        log::info!(
            "Request {} submitted by {} ({} to {}, {} days)",
            request.id,
            request.employee_name,
            request.start_date,
            request.end_date,
            request.calculated_days
        );

        self.publish(&request).await;
        Ok(request)
    }

    /// Apply one approval-step decision and return the updated request plus
    /// the emitted domain event.
    ///
    /// On final approval of a leave request the ledger is debited before the
    /// request is written back, so a lost balance race leaves the request in
    /// its previous valid state and the caller can retry from a fresh read.
    pub async fn decide(
        &self,
        request_id: Uuid,
        actor: Actor,
        decision: ApprovalDecision,
        comments: Option<String>,
    ) -> Result<(Request, RequestEvent), DomainError> {
        let current = self
            .requests
            .get(request_id)
            .await
            .ok_or_else(|| DomainError::NotFound(format!("request {} not found", request_id)))?;

        let transition = state_machine::apply_decision(&current, &actor, decision, comments)?;

        if let Some(commit) = &transition.balance_commit {
            let balance = self.balances.commit(commit).await?;
            log::info!(
                "Balance committed for request {}: {} {} days used, {} remaining",
                request_id,
                commit.days,
                commit.leave_type,
                balance.remaining()
            );
        }

        let updated = self.requests.update(transition.request).await?;
        log::info!(
            "Request {} decided by {} ({}): now {}",
            request_id,
            actor.name,
            actor.role,
            updated.status
        );

        let event = self.publish(&updated).await;
        Ok((updated, event))
    }

    /// Re-dispatch the notification for an already-decided request. Not a
    /// state transition; calling it any number of times changes nothing.
    pub async fn republish(&self, request_id: Uuid) -> Result<RequestEvent, DomainError> {
        let request = self
            .requests
            .get(request_id)
            .await
            .ok_or_else(|| DomainError::NotFound(format!("request {} not found", request_id)))?;

        if request.status == RequestStatus::Pending {
            return Err(DomainError::Validation(format!(
                "request {} has not been decided yet",
                request_id
            )));
        }

        Ok(self.publish(&request).await)
    }

    pub async fn get(&self, request_id: Uuid) -> Result<Request, DomainError> {
        self.requests
            .get(request_id)
            .await
            .ok_or_else(|| DomainError::NotFound(format!("request {} not found", request_id)))
    }

    pub async fn list(&self, filter: RequestFilter) -> Vec<Request> {
        self.requests.list(filter).await
    }

    /// Build the domain event for the request's current state and hand the
    /// matching message to the notifier. Dispatch failures are logged and
    /// swallowed; they never affect the transition that produced the event.
    async fn publish(&self, request: &Request) -> RequestEvent {
        let event = RequestEvent::from_request(request);

        match self.directory.get(request.employee_id).await {
            Some(contact) => {
                let message = NotificationMessage::for_recipient(&event, contact.email);
                if let Err(err) = self.notifier.dispatch(&message) {
                    log::warn!(
                        "Notification dispatch failed for request {}: {}",
                        request.id,
                        err
                    );
                }
            }
            None => {
                log::warn!(
                    "No directory contact for employee {}; skipping notification",
                    request.employee_id
                );
            }
        }

        event
    }
}
