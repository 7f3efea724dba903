use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

use leaveflow::domain::models::{Holiday, HolidayType, LeaveType};
use leaveflow::store::{
    BalanceRepository, DirectoryRepository, EmployeeContact, HolidayRepository, RequestRepository,
};
use leaveflow::{LogNotifier, RequestService};

/// Everything a test needs: the orchestrator plus direct handles on the
/// stores so tests can seed and inspect state.
pub struct TestContext {
    pub service: RequestService,
    pub requests: RequestRepository,
    pub balances: BalanceRepository,
    pub holidays: HolidayRepository,
    pub directory: DirectoryRepository,
    pub employee_id: Uuid,
}

impl TestContext {
    /// Fresh stores with one seeded employee: 20 vacation, 10 sick and 2
    /// personal days for 2025, plus a directory contact.
    pub async fn new() -> Self {
        let requests = RequestRepository::new();
        let balances = BalanceRepository::new();
        let holidays = HolidayRepository::new();
        let directory = DirectoryRepository::new();

        let service = RequestService::new(
            requests.clone(),
            balances.clone(),
            holidays.clone(),
            directory.clone(),
            Arc::new(LogNotifier),
        );

        let employee_id = Uuid::new_v4();
        directory
            .upsert(EmployeeContact {
                employee_id,
                name: Name().fake(),
                email: SafeEmail().fake(),
            })
            .await;

        balances
            .set_allocation(employee_id, LeaveType::Vacation, 2025, BigDecimal::from(20))
            .await;
        balances
            .set_allocation(employee_id, LeaveType::Sick, 2025, BigDecimal::from(10))
            .await;
        balances
            .set_allocation(employee_id, LeaveType::Personal, 2025, BigDecimal::from(2))
            .await;

        TestContext {
            service,
            requests,
            balances,
            holidays,
            directory,
            employee_id,
        }
    }

    pub async fn add_holiday(&self, date: NaiveDate, name: &str) {
        self.holidays
            .upsert(Holiday {
                date,
                kind: HolidayType::Company,
                name: name.to_string(),
            })
            .await;
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn days(s: &str) -> BigDecimal {
    s.parse().unwrap()
}
