use chrono::{NaiveDate, Utc};

/// Source of "today" for scheduling. Injected so the algorithms never read the wall clock.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Current UTC calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
