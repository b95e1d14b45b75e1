use crate::store::RegionalConfigStore;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use std::ops::RangeInclusive;
use tracing::warn;

/// Business-day rules per jurisdiction: weekends plus the listed public holidays
///
/// Unknown jurisdictions fail open: every date is a business day.
#[derive(Debug, Clone, Copy)]
pub struct BusinessCalendar<'a> {
    store: &'a RegionalConfigStore,
}

impl<'a> BusinessCalendar<'a> {
    pub fn new(store: &'a RegionalConfigStore) -> Self {
        Self { store }
    }

    /// Check if a date is a business day (not weekend or holiday)
    ///
    /// Logs a warning for a weekday in a year the holiday list does not cover.
    pub fn is_business_day(&self, jurisdiction_id: &str, date: NaiveDate) -> bool {
        let business = self.is_open(jurisdiction_id, date);
        if business {
            self.warn_if_uncovered(jurisdiction_id, date, date);
        }
        business
    }

    /// First business day on or after `date`
    ///
    /// Saturates at `NaiveDate::MAX`, which is returned even when it is not
    /// a business day.
    pub fn next_business_day(&self, jurisdiction_id: &str, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while !self.is_open(jurisdiction_id, current) {
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        self.warn_if_uncovered(jurisdiction_id, date, current);
        current
    }

    /// Add business days to a date, excluding weekends and the jurisdiction's holidays
    ///
    /// The start date itself is not counted. Saturates at `NaiveDate::MAX`.
    pub fn add_business_days(&self, jurisdiction_id: &str, start: NaiveDate, days: u32) -> NaiveDate {
        let mut current = start;
        let mut remaining = days;

        while remaining > 0 {
            current = match current.succ_opt() {
                Some(next) => next,
                None => break,
            };

            if self.is_open(jurisdiction_id, current) {
                remaining -= 1;
            }
        }

        self.warn_if_uncovered(jurisdiction_id, start, current);
        current
    }

    /// Years the jurisdiction's holiday list covers
    pub fn holiday_coverage(&self, jurisdiction_id: &str) -> Option<RangeInclusive<i32>> {
        self.store.get(jurisdiction_id)?.banking.holiday_years()
    }

    /// Bank counters open at `at`: a business day, within banking hours
    pub fn is_banking_open(&self, jurisdiction_id: &str, at: NaiveDateTime) -> bool {
        let Some(config) = self.store.get(jurisdiction_id) else {
            return true;
        };
        self.is_business_day(jurisdiction_id, at.date()) && config.banking.within_hours(at)
    }

    fn is_open(&self, jurisdiction_id: &str, date: NaiveDate) -> bool {
        match self.store.get(jurisdiction_id) {
            Some(config) => !is_weekend(date) && !config.banking.is_holiday(date),
            None => true,
        }
    }

    /// One warning per operation when `from..=to` leaves the holiday list's years
    fn warn_if_uncovered(&self, jurisdiction_id: &str, from: NaiveDate, to: NaiveDate) {
        let Some(coverage) = self.holiday_coverage(jurisdiction_id) else {
            return;
        };
        if coverage.contains(&from.year()) && coverage.contains(&to.year()) {
            return;
        }
        warn!(
            jurisdiction = jurisdiction_id,
            %from,
            %to,
            covered_from = coverage.start(),
            covered_to = coverage.end(),
            "Dates outside holiday coverage, only weekends excluded"
        );
    }
}

/// Check if a date is a weekend
fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
