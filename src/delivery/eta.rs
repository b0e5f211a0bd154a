//! Delivery date computation.

use chrono::{Days, Local, NaiveDate};

/// Display format for ETAs, e.g. "Friday, 16 October 2026".
pub const ETA_FORMAT: &str = "%A, %d %B %Y";

/// Source of the current date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Format `today + days`. Returns `None` if the date would overflow.
pub fn compute_eta(today: NaiveDate, days: u32) -> Option<String> {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .map(|date| date.format(ETA_FORMAT).to_string())
}
