//! Account-age cohort aggregation
//!
//! Ages use a fixed 30-day month, not calendar months. Only active accounts
//! younger than `COHORT_MONTHS` months are counted; everything else is
//! dropped without error.

use crate::directory::AccountRecord;
use chrono::NaiveDateTime;
use tracing::debug;

/// Number of monthly cohorts in the trailing window
pub const COHORT_MONTHS: usize = 24;

/// Days per cohort month
pub const DAYS_PER_MONTH: i64 = 30;

/// Count of active accounts per age-in-months, index 0 being the youngest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Histogram {
    slots: [u64; COHORT_MONTHS],
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[u64; COHORT_MONTHS] {
        &self.slots
    }

    pub fn get(&self, month: usize) -> Option<u64> {
        self.slots.get(month).copied()
    }

    pub fn total(&self) -> u64 {
        self.slots.iter().sum()
    }

    /// `(month, count)` pairs in ascending month order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.slots.iter().copied().enumerate()
    }

    fn record(&mut self, month: usize) {
        if let Some(slot) = self.slots.get_mut(month) {
            *slot += 1;
        }
    }
}

/// Whole months since `joined`, or `None` when `joined` lies after `now`
pub fn age_in_months(joined: NaiveDateTime, now: NaiveDateTime) -> Option<usize> {
    if joined > now {
        return None;
    }
    let age_days = (now - joined).num_days();
    usize::try_from(age_days / DAYS_PER_MONTH).ok()
}

/// Bucket active accounts into monthly cohorts relative to `now`
pub fn aggregate(accounts: &[AccountRecord], now: NaiveDateTime) -> Histogram {
    let mut histogram = Histogram::new();

    for account in accounts.iter().filter(|account| account.status.is_active()) {
        match age_in_months(account.joined, now) {
            Some(month) => histogram.record(month),
            None => debug!(
                "Account {} joined at {} which is after {}, skipping",
                account.id, account.joined, now
            ),
        }
    }

    debug!("Cohort histogram: {:?}", histogram.slots());
    histogram
}
