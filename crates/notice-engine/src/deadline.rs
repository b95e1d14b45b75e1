//! Statutory deadline computation
//!
//! A deadline is the anchor date plus the jurisdiction's flat legal period
//! for the category (calendar days), rolled forward to the next business
//! day when it lands on a weekend or public holiday.
//!
//! Missing configuration never fails the caller: an unknown jurisdiction or
//! an unset category means a zero-day period and no roll-forward.

use crate::calendar::BusinessCalendar;
use crate::jurisdiction::DeadlineCategory;
use crate::store::RegionalConfigStore;
use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct DeadlineCalculator<'a> {
    store: &'a RegionalConfigStore,
    calendar: BusinessCalendar<'a>,
}

impl<'a> DeadlineCalculator<'a> {
    pub fn new(store: &'a RegionalConfigStore) -> Self {
        Self {
            store,
            calendar: BusinessCalendar::new(store),
        }
    }

    pub fn calendar(&self) -> &BusinessCalendar<'a> {
        &self.calendar
    }

    /// Legal period in calendar days (0 when not configured)
    pub fn offset_days(&self, jurisdiction_id: &str, category: DeadlineCategory) -> u32 {
        self.store
            .get(jurisdiction_id)
            .map(|config| config.deadline_days(category))
            .unwrap_or(0)
    }

    /// Deadline for `category` starting from `anchor`, on a business day
    pub fn compute_deadline(
        &self,
        jurisdiction_id: &str,
        anchor: NaiveDate,
        category: DeadlineCategory,
    ) -> NaiveDate {
        let Some(config) = self.store.get(jurisdiction_id) else {
            warn!(
                jurisdiction = jurisdiction_id,
                %category,
                "Unknown jurisdiction, deadline not adjusted"
            );
            return anchor;
        };

        if !config.legal_deadlines.contains_key(&category) {
            warn!(
                jurisdiction = jurisdiction_id,
                %category,
                "No legal period configured, using 0 days"
            );
        }

        let offset = config.deadline_days(category);
        let candidate = anchor
            .checked_add_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MAX);
        let deadline = self.calendar.next_business_day(jurisdiction_id, candidate);

        debug!(
            jurisdiction = jurisdiction_id,
            %category,
            %anchor,
            offset,
            %candidate,
            %deadline,
            rolled_days = (deadline - candidate).num_days(),
            "Computed deadline"
        );

        deadline
    }

    /// Deadlines for every category, in category order
    pub fn compute_all(
        &self,
        jurisdiction_id: &str,
        anchor: NaiveDate,
    ) -> Vec<(DeadlineCategory, NaiveDate)> {
        DeadlineCategory::ALL
            .into_iter()
            .map(|category| {
                (
                    category,
                    self.compute_deadline(jurisdiction_id, anchor, category),
                )
            })
            .collect()
    }

    /// Earliest lawful effect date for a notice issued on `issue_date`
    pub fn minimum_effect_date(&self, jurisdiction_id: &str, issue_date: NaiveDate) -> NaiveDate {
        self.compute_deadline(jurisdiction_id, issue_date, DeadlineCategory::NoticeToQuit)
    }

    /// Advisory: does `effect_date` honour the legal period for `category`?
    pub fn meets_legal_minimum(
        &self,
        jurisdiction_id: &str,
        issue_date: NaiveDate,
        effect_date: NaiveDate,
        category: DeadlineCategory,
    ) -> bool {
        effect_date >= self.compute_deadline(jurisdiction_id, issue_date, category)
    }
}
