use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

/// A non-working date supplied by the external holiday store. Read-only
/// from the engine's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,
    pub kind: HolidayType,
    pub name: String,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum HolidayType {
        National => "national",
        Company => "company",
        Religious => "religious",
    }
}
