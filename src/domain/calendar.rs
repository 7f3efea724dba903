use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Classification of a single calendar day against the working-day rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClassification {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_holiday: bool,
}

impl DayClassification {
    /// A chargeable day is neither weekend nor holiday.
    pub fn is_chargeable(&self) -> bool {
        !self.is_weekend && !self.is_holiday
    }
}

/// Classify one date. Sunday is the only non-working weekday here;
/// Saturday counts as a working day. This mirrors the business rule
/// enforced upstream, a domain policy rather than a general calendar truth.
/// A date in the holiday set is a holiday regardless of weekday.
pub fn classify(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> DayClassification {
    DayClassification {
        date,
        is_weekend: date.weekday() == Weekday::Sun,
        is_holiday: holidays.contains(&date),
    }
}

/// Classify every day from `start` through `end`, both endpoints included.
/// Callers are expected to have validated `start <= end`; a reversed range
/// yields an empty sequence.
pub fn enumerate_days(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &BTreeSet<NaiveDate>,
) -> Vec<DayClassification> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| classify(day, holidays))
        .collect()
}
