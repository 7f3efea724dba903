use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::models::Holiday;

/// In-memory stand-in for the external holiday store. Calculations query
/// it fresh every time; the engine never caches the holiday set, so an
/// upsert is visible to the very next calculation.
#[derive(Clone, Default)]
pub struct HolidayRepository {
    holidays: Arc<RwLock<BTreeMap<NaiveDate, Holiday>>>,
}

impl HolidayRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the holiday on a date
    pub async fn upsert(&self, holiday: Holiday) -> Holiday {
        let mut holidays = self.holidays.write().await;
        holidays.insert(holiday.date, holiday.clone());
        holiday
    }

    /// Remove the holiday on a date, if any
    pub async fn remove(&self, date: NaiveDate) -> Option<Holiday> {
        let mut holidays = self.holidays.write().await;
        holidays.remove(&date)
    }

    /// List holidays within a date range, both endpoints included
    pub async fn list_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
        let holidays = self.holidays.read().await;
        holidays.range(start..=end).map(|(_, h)| h.clone()).collect()
    }

    /// List every known holiday in date order
    pub async fn list_all(&self) -> Vec<Holiday> {
        let holidays = self.holidays.read().await;
        holidays.values().cloned().collect()
    }
}
