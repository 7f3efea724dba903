use std::collections::BTreeSet;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;

use super::calendar;
use super::models::DurationGranularity;

impl DurationGranularity {
    /// Fraction of a working day this granularity consumes.
    pub fn multiplier(&self) -> BigDecimal {
        match self {
            Self::FullDay => BigDecimal::from(1),
            Self::HalfDayMorning | Self::HalfDayAfternoon => {
                BigDecimal::from(1) / BigDecimal::from(2)
            }
            Self::QuarterDayOne
            | Self::QuarterDayTwo
            | Self::QuarterDayThree
            | Self::QuarterDayFour => BigDecimal::from(1) / BigDecimal::from(4),
        }
    }
}

/// Days in the range that are neither weekend nor holiday.
pub fn chargeable_days(start: NaiveDate, end: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> u32 {
    calendar::enumerate_days(start, end, holidays)
        .iter()
        .filter(|day| day.is_chargeable())
        .count() as u32
}

/// Convert a date range plus a granularity into the fractional number of
/// days it charges, rounded to 2 decimal places half-up. Returns 0 for a
/// range made up entirely of weekends/holidays; the orchestrator rejects
/// such submissions instead of approving a zero-day request.
pub fn calculate(
    start: NaiveDate,
    end: NaiveDate,
    granularity: DurationGranularity,
    holidays: &BTreeSet<NaiveDate>,
) -> BigDecimal {
    let chargeable = BigDecimal::from(chargeable_days(start, end, holidays));
    (chargeable * granularity.multiplier()).with_scale_round(2, RoundingMode::HalfUp)
}
