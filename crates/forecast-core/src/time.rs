use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Clock abstracts access to the user's wall-clock time so "today" is captured once, outside
/// the simulation, and tests stay deterministic.
pub trait Clock: Send + Sync {
    /// Current local date and time, without a zone.
    fn now(&self) -> NaiveDateTime;

    /// Current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock pinned to midnight of a fixed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::default())
    }

    fn today(&self) -> NaiveDate {
        self.date
    }
}
