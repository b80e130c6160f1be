//! Clock port - the source of "today".

use chrono::NaiveDate;

/// Supplies the current calendar date in the server's time zone.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// A clock stuck on one date. Used by tests and for replaying a given day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
