//! Source of "now" for every operation that stamps or filters by date.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cell::Cell;

pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Current time truncated to whole seconds (`HH:MM:SS`).
    fn time(&self) -> NaiveTime {
        let t = self.now().time();
        t.with_nanosecond(0).unwrap_or(t)
    }

    /// `YYYY-MM-DD HH:MM:SS`, the format the archive server expects.
    fn timestamp(&self) -> String {
        self.now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Local wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock.
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Build from `YYYY-MM-DD` and `HH:MM:SS`. Panics on malformed input.
    pub fn at(date: &str, time: &str) -> Self {
        let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date");
        let t = NaiveTime::parse_from_str(time, "%H:%M:%S").expect("valid time");
        Self::new(d.and_time(t))
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
