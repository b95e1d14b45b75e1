//! Built-in regional configurations
//!
//! One module per country. Each module owns the statutory periods, tax
//! rates, payment rules and public-holiday list of its jurisdictions.
//!
//! Holiday lists are explicit dates for 2025 and 2026 only. Dates in other
//! years fall back to weekend-only business-day rules, which
//! [`BusinessCalendar`](crate::calendar::BusinessCalendar) reports as a
//! coverage gap.

pub mod cote_divoire;
pub mod guinea;
pub mod senegal;

use crate::jurisdiction::RegionalConfig;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeSet;

/// Every built-in jurisdiction
pub fn builtin_configs() -> Vec<RegionalConfig> {
    vec![
        guinea::conakry(),
        senegal::dakar(),
        cote_divoire::abidjan(),
    ]
}

/// Build a holiday set from `(year, month, day)` triples
pub(crate) fn holidays(dates: &[(i32, u32, u32)]) -> BTreeSet<NaiveDate> {
    dates
        .iter()
        .filter_map(|&(year, month, day)| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

pub(crate) fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}
